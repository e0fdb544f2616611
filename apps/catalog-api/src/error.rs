//! Error types for the catalog API.
//!
//! Every failure is rendered as the failure envelope `{success: false, message}`.
//!
//! | Variant            | Status |
//! |--------------------|--------|
//! | `MissingFields`    | 400    |
//! | `MissingId`        | 400    |
//! | `InvalidQuery`     | 400    |
//! | `MethodNotAllowed` | 405    |
//! | `ListFailed`       | 500    |
//! | `Database`         | 500    |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use vitrine_db::DbError;

use crate::envelope::Envelope;
use crate::request::Action;

/// Catalog API errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// POST/PUT without all five fields.
    #[error("{}", .0.missing_fields_message())]
    MissingFields(Action),

    /// DELETE without an id.
    #[error("ID do produto é obrigatório para a remoção.")]
    MissingId,

    /// Query string that does not parse (e.g. a repeated `id`).
    #[error("Parâmetros de consulta inválidos: {0}")]
    InvalidQuery(String),

    #[error("Método de requisição não suportado.")]
    MethodNotAllowed,

    #[error("Erro ao carregar produtos: {0}")]
    ListFailed(#[source] DbError),

    /// The statement failed. The database text is part of the message.
    #[error("{} {source}", .action.failure_prefix())]
    Database {
        action: Action,
        #[source]
        source: DbError,
    },
}

impl EndpointError {
    pub fn database(action: Action, source: DbError) -> Self {
        EndpointError::Database { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            EndpointError::MissingFields(_)
            | EndpointError::MissingId
            | EndpointError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            EndpointError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            EndpointError::ListFailed(_) | EndpointError::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        match &self {
            EndpointError::Database { action, source } => {
                error!(?action, error = %source, "Catalog statement failed");
            }
            EndpointError::ListFailed(source) => {
                error!(error = %source, "Catalog listing failed");
            }
            _ => {}
        }
        (self.status(), Json(Envelope::failure(self.to_string()))).into_response()
    }
}

pub type EndpointResult<T> = Result<T, EndpointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EndpointError::MissingFields(Action::Create).to_string(),
            "Todos os campos são obrigatórios."
        );
        assert_eq!(
            EndpointError::MissingFields(Action::Update).to_string(),
            "Todos os campos são obrigatórios para a atualização."
        );

        let err = EndpointError::database(Action::Create, DbError::duplicate("id", "7"));
        assert_eq!(
            err.to_string(),
            "Erro ao adicionar produto: Duplicate id: '7' already exists"
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
