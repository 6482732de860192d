//! Request decoding.
//!
//! # Responsibilities
//! - Parse query strings into a key/value map (last value wins)
//! - Decode single-message and batch bodies into typed messages
//! - Produce the request context alongside every body decode
//!
//! # Design Decisions
//! - Body decode and context extraction are one step with one failure
//!   point; handlers never see a half-decoded request
//! - Batch decode is all-or-nothing: the first malformed element fails
//!   the whole request and the facade is never invoked
//! - Query parsing performs no validation; unknown keys pass through

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::http::context::RequestContext;

/// Filter and pagination parameters from the query string.
pub type QueryParams = HashMap<String, String>;

/// Decode a query string into a map. Repeated keys keep the last value.
pub fn parse_query(query: &str) -> QueryParams {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Failure to decode a request into its expected shape.
///
/// Always produced before the access control service is invoked; encodes
/// as a `ParseException` envelope.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read request body: {0}")]
    Read(String),

    #[error("malformed request payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed batch element at index {index}: {source}")]
    Element {
        index: usize,
        source: serde_json::Error,
    },
}

/// Decode an ordered batch of same-shaped messages.
///
/// The body must be a well-formed JSON array; elements are decoded in
/// order and appended to the result, stopping at the first failure.
pub fn decode_batch<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, ParseError> {
    let elements: Vec<Value> = serde_json::from_slice(bytes)?;
    let mut batch = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let item = serde_json::from_value(element)
            .map_err(|source| ParseError::Element { index, source })?;
        batch.push(item);
    }
    Ok(batch)
}

async fn read_body(req: Request) -> Result<(RequestContext, axum::body::Bytes), ParseError> {
    let (parts, body) = req.into_parts();
    let ctx = RequestContext::from_headers(&parts.headers);
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ParseError::Read(e.to_string()))?;
    Ok((ctx, bytes))
}

/// Extractor for a single-message body plus the request context.
#[derive(Debug)]
pub struct Single<T>(pub RequestContext, pub T);

impl<S, T> FromRequest<S> for Single<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ParseError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (ctx, bytes) = read_body(req).await?;
        let message = serde_json::from_slice(&bytes)?;
        Ok(Single(ctx, message))
    }
}

/// Extractor for an ordered homogeneous batch body plus the request context.
#[derive(Debug)]
pub struct Batch<T>(pub RequestContext, pub Vec<T>);

impl<S, T> FromRequest<S> for Batch<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ParseError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (ctx, bytes) = read_body(req).await?;
        let batch = decode_batch(&bytes)?;
        Ok(Batch(ctx, batch))
    }
}

/// Extractor for query parameters plus the request context. Never fails.
#[derive(Debug)]
pub struct Params(pub RequestContext, pub QueryParams);

impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::from_headers(&parts.headers);
        let params = parse_query(parts.uri.query().unwrap_or(""));
        Ok(Params(ctx, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn repeated_query_key_keeps_last_value() {
        let params = parse_query("id=1&id=2");
        assert_eq!(params.get("id").map(String::as_str), Some("2"));
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let params = parse_query("name=a%20b&offset=0&limit=10");
        assert_eq!(params.get("name").map(String::as_str), Some("a b"));
        assert_eq!(params.get("limit").map(String::as_str), Some("10"));
    }

    #[test]
    fn empty_query_yields_empty_map() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn batch_preserves_input_order() {
        let body = br#"[{"name":"alice"},{"name":"bob"},{"name":"carol"}]"#;
        let users: Vec<User> = decode_batch(body).unwrap();
        let names: Vec<_> = users.iter().filter_map(|u| u.name.as_deref()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn batch_fails_on_first_malformed_element() {
        let body = br#"[{"name":"alice"},{"name":42},{"name":"carol"}]"#;
        let err = decode_batch::<User>(body).unwrap_err();
        match err {
            ParseError::Element { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn batch_rejects_non_array_body() {
        let body = br#"{"name":"alice"}"#;
        assert!(decode_batch::<User>(body).is_err());
    }

    #[test]
    fn empty_batch_is_well_formed() {
        let users: Vec<User> = decode_batch(b"[]").unwrap();
        assert!(users.is_empty());
    }
}
