//! `Query<T>` whose rejection is the failure envelope instead of axum's
//! plain-text body.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::EndpointError;

pub struct EnvelopeQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for EnvelopeQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = EndpointError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| EndpointError::InvalidQuery(rejection.body_text()))?;
        Ok(EnvelopeQuery(value))
    }
}
