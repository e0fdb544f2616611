//! Request parsing: method + query + body → [`CatalogCommand`].
//!
//! ```text
//! GET     ─────────────────────────────► List
//! POST    body {id,title,description,   ► Create(entry)   all five required
//!              image,whatsappMessage}
//! PUT     same body                     ► Update(entry)   all five required
//! DELETE  ?id=  or  body {id}           ► Delete{id}      query wins
//! other   ─────────────────────────────► MethodNotAllowed
//! ```
//!
//! A body that is not a JSON object counts as empty, so it fails the
//! required-field check instead of being a separate error.

use axum::http::Method;
use serde_json::{Map, Value};
use tracing::debug;

use vitrine_core::validation::validate_catalog_entry;
use vitrine_core::CatalogEntry;

use crate::error::{EndpointError, EndpointResult};

/// Write operation, used to pick messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn success_message(self) -> &'static str {
        match self {
            Action::Create => "Produto adicionado com sucesso.",
            Action::Update => "Produto atualizado com sucesso.",
            Action::Delete => "Produto removido com sucesso.",
        }
    }

    pub fn failure_prefix(self) -> &'static str {
        match self {
            Action::Create => "Erro ao adicionar produto:",
            Action::Update => "Erro ao atualizar produto:",
            Action::Delete => "Erro ao remover produto:",
        }
    }

    pub fn missing_fields_message(self) -> &'static str {
        match self {
            Action::Update => "Todos os campos são obrigatórios para a atualização.",
            Action::Create | Action::Delete => "Todos os campos são obrigatórios.",
        }
    }
}

/// One parsed request.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    List,
    Create(CatalogEntry),
    Update(CatalogEntry),
    Delete { id: String },
}

impl CatalogCommand {
    /// Parses a request. `query_id` is the `?id=` parameter, if present.
    pub fn parse(method: &Method, query_id: Option<String>, body: &[u8]) -> EndpointResult<Self> {
        if method == Method::GET {
            Ok(CatalogCommand::List)
        } else if method == Method::POST {
            entry_from_body(body, Action::Create).map(CatalogCommand::Create)
        } else if method == Method::PUT {
            entry_from_body(body, Action::Update).map(CatalogCommand::Update)
        } else if method == Method::DELETE {
            let id = query_id
                .or_else(|| string_field(&body_object(body), "id"))
                .unwrap_or_default();
            if id.trim().is_empty() {
                return Err(EndpointError::MissingId);
            }
            Ok(CatalogCommand::Delete { id })
        } else {
            Err(EndpointError::MethodNotAllowed)
        }
    }
}

fn body_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            if !body.is_empty() {
                debug!(error = %e, "Request body is not JSON");
            }
            Map::new()
        }
    }
}

/// Strings are taken as-is; numbers are accepted as their text form.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn entry_from_body(body: &[u8], action: Action) -> EndpointResult<CatalogEntry> {
    let map = body_object(body);
    let field = |key: &str| string_field(&map, key).unwrap_or_default();

    let entry = CatalogEntry {
        id: field("id"),
        title: field("title"),
        description: field("description"),
        image: field("image"),
        whatsapp_message: field("whatsappMessage"),
    };

    validate_catalog_entry(&entry).map_err(|e| {
        debug!(?action, reason = %e, "Rejected catalog entry");
        EndpointError::MissingFields(action)
    })?;

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "look-1",
            "title": "Look de Hoje",
            "description": "Conjunto de linho",
            "image": "https://cdn.example/look-1.jpg",
            "whatsappMessage": "Quero alugar o Look de Hoje"
        }))
        .unwrap()
    }

    #[test]
    fn test_get_is_list() {
        assert_eq!(
            CatalogCommand::parse(&Method::GET, None, b"").unwrap(),
            CatalogCommand::List
        );
    }

    #[test]
    fn test_post_requires_every_field() {
        let cmd = CatalogCommand::parse(&Method::POST, None, &full_body()).unwrap();
        let CatalogCommand::Create(entry) = cmd else {
            panic!("expected Create");
        };
        assert_eq!(entry.whatsapp_message, "Quero alugar o Look de Hoje");

        let partial = serde_json::to_vec(&json!({ "id": "x", "title": "t" })).unwrap();
        let err = CatalogCommand::parse(&Method::PUT, None, &partial).unwrap_err();
        assert!(matches!(err, EndpointError::MissingFields(Action::Update)));

        let err = CatalogCommand::parse(&Method::POST, None, b"not json").unwrap_err();
        assert!(matches!(err, EndpointError::MissingFields(Action::Create)));
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let body = serde_json::to_vec(&json!({
            "id": 42,
            "title": "t",
            "description": "d",
            "image": "i",
            "whatsappMessage": "w"
        }))
        .unwrap();
        let cmd = CatalogCommand::parse(&Method::POST, None, &body).unwrap();
        assert!(matches!(cmd, CatalogCommand::Create(ref e) if e.id == "42"));
    }

    #[test]
    fn test_delete_id_sources() {
        let body = serde_json::to_vec(&json!({ "id": "from-body" })).unwrap();

        let cmd = CatalogCommand::parse(&Method::DELETE, Some("from-query".into()), &body).unwrap();
        assert_eq!(cmd, CatalogCommand::Delete { id: "from-query".into() });

        let cmd = CatalogCommand::parse(&Method::DELETE, None, &body).unwrap();
        assert_eq!(cmd, CatalogCommand::Delete { id: "from-body".into() });

        let err = CatalogCommand::parse(&Method::DELETE, None, b"").unwrap_err();
        assert!(matches!(err, EndpointError::MissingId));
    }

    #[test]
    fn test_other_methods() {
        let err = CatalogCommand::parse(&Method::PATCH, None, &full_body()).unwrap_err();
        assert!(matches!(err, EndpointError::MethodNotAllowed));
    }
}
