//! The `/products` route.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use vitrine_core::CatalogEntry;
use vitrine_db::CatalogRepository;

use crate::envelope::Envelope;
use crate::error::{EndpointError, EndpointResult};
use crate::extract::EnvelopeQuery;
use crate::request::{Action, CatalogCommand};

/// Create the application router.
pub fn create_router(repo: CatalogRepository) -> Router {
    Router::new()
        .route("/products", any(dispatch))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(repo)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdQuery {
    pub id: Option<String>,
}

async fn dispatch(
    State(repo): State<CatalogRepository>,
    method: Method,
    EnvelopeQuery(query): EnvelopeQuery<IdQuery>,
    body: Bytes,
) -> Response {
    // Preflight without CORS headers still gets a bare 200
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let result = match CatalogCommand::parse(&method, query.id, &body) {
        Ok(command) => execute(&repo, command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn execute(repo: &CatalogRepository, command: CatalogCommand) -> EndpointResult<Response> {
    match command {
        CatalogCommand::List => {
            let entries = repo
                .list_all()
                .await
                .map_err(EndpointError::ListFailed)?;
            debug!(count = entries.len(), "Listing catalog");
            let by_id: BTreeMap<String, CatalogEntry> = entries
                .into_iter()
                .map(|entry| (entry.id.clone(), entry))
                .collect();
            Ok(Envelope::data(by_id).into_response())
        }
        CatalogCommand::Create(entry) => {
            repo.insert(&entry)
                .await
                .map_err(|e| EndpointError::database(Action::Create, e))?;
            info!(id = %entry.id, "Catalog entry added");
            Ok(Envelope::done(Action::Create.success_message()).into_response())
        }
        CatalogCommand::Update(entry) => {
            let rows = repo
                .update(&entry)
                .await
                .map_err(|e| EndpointError::database(Action::Update, e))?;
            info!(id = %entry.id, rows, "Catalog entry updated");
            Ok(Envelope::done(Action::Update.success_message()).into_response())
        }
        CatalogCommand::Delete { id } => {
            let rows = repo
                .delete(&id)
                .await
                .map_err(|e| EndpointError::database(Action::Delete, e))?;
            info!(id = %id, rows, "Catalog entry removed");
            Ok(Envelope::done(Action::Delete.success_message()).into_response())
        }
    }
}
