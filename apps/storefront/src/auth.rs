//! Bearer-token gate for the admin routes.
//!
//! ```text
//! Authorization: Bearer <token>
//!        │
//!        ▼
//! require_admin ── AdminSessions::authorize ──► ok: AdminToken extension, next
//!                                          └──► 401 UNAUTHORIZED
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Token of the session that passed [`require_admin`].
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

/// Extracts the token from `Authorization: Bearer <token>`.
/// The scheme is matched case-insensitively.
pub fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            if v.len() >= 7 && v[..7].eq_ignore_ascii_case("bearer ") {
                Some(v[7..].trim())
            } else {
                None
            }
        })
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a live admin session.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let Some(token) = bearer_token(&req).map(str::to_string) else {
        debug!(path = %req.uri().path(), "Admin route called without a token");
        return Err(ApiError::unauthorized("Admin session required"));
    };

    state.sessions.authorize(&token).await?;

    req.extensions_mut().insert(AdminToken(token));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/admin/products");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&request(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }
}
