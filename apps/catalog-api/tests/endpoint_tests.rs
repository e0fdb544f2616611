//! Integration tests for the `/products` endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_api::create_router;
use vitrine_db::{Database, DbConfig};

async fn test_router() -> axum::Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    create_router(db.catalog())
}

/// Sends a request and returns status plus raw body.
async fn send(router: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn json_request(router: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn entry(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Look completo para eventos",
        "image": format!("https://cdn.example/{id}.jpg"),
        "whatsappMessage": format!("Olá! Quero alugar: {title}")
    })
}

#[tokio::test]
async fn test_full_crud_cycle() {
    let router = test_router().await;

    let (status, body) = json_request(&router, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": {} }));

    let (status, body) = json_request(&router, "POST", "/products", Some(entry("a1", "Vestido Azul"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Produto adicionado com sucesso.");

    let (_, body) = json_request(&router, "GET", "/products", None).await;
    assert_eq!(body["data"]["a1"]["title"], "Vestido Azul");
    assert_eq!(body["data"]["a1"]["whatsappMessage"], "Olá! Quero alugar: Vestido Azul");

    let mut changed = entry("a1", "Vestido Azul");
    changed["description"] = json!("d2");
    let (status, body) = json_request(&router, "PUT", "/products", Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Produto atualizado com sucesso.");

    let (_, body) = json_request(&router, "GET", "/products", None).await;
    assert_eq!(
        body["data"]["a1"],
        json!({
            "id": "a1",
            "title": "Vestido Azul",
            "description": "d2",
            "image": "https://cdn.example/a1.jpg",
            "whatsappMessage": "Olá! Quero alugar: Vestido Azul"
        })
    );

    let (status, body) = json_request(&router, "DELETE", "/products?id=a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Produto removido com sucesso.");

    let (_, body) = json_request(&router, "GET", "/products", None).await;
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
async fn test_update_of_unknown_id_still_succeeds() {
    let router = test_router().await;

    let (status, body) = json_request(&router, "PUT", "/products", Some(entry("ghost", "Nada"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_delete_id_from_body() {
    let router = test_router().await;
    json_request(&router, "POST", "/products", Some(entry("b2", "Terno"))).await;

    let (status, body) = json_request(&router, "DELETE", "/products", Some(json!({ "id": "b2" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = json_request(&router, "DELETE", "/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "ID do produto é obrigatório para a remoção.");
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let router = test_router().await;

    let mut incomplete = entry("c3", "Saia");
    incomplete["whatsappMessage"] = json!("");

    let (status, body) = json_request(&router, "POST", "/products", Some(incomplete)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "message": "Todos os campos são obrigatórios." }));

    // Nothing reached the table
    let (_, body) = json_request(&router, "GET", "/products", None).await;
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
async fn test_duplicate_post_is_database_error() {
    let router = test_router().await;
    json_request(&router, "POST", "/products", Some(entry("d4", "Blazer"))).await;

    let (status, body) = json_request(&router, "POST", "/products", Some(entry("d4", "Outro"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Erro ao adicionar produto:"));
    assert!(message.contains("d4"));
}

#[tokio::test]
async fn test_options_preflight() {
    let router = test_router().await;

    let (status, bytes) = send(&router, "OPTIONS", "/products", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_unsupported_method() {
    let router = test_router().await;

    let (status, body) = json_request(&router, "PATCH", "/products", Some(entry("e5", "x"))).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "success": false, "message": "Método de requisição não suportado." }));
}

#[tokio::test]
async fn test_malformed_query_gets_envelope() {
    let router = test_router().await;

    let (status, body) = json_request(&router, "DELETE", "/products?id=a&id=b", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Parâmetros de consulta inválidos:"));
}
