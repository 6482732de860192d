//! Per-request context derived from headers.
//!
//! Construction never fails: a missing or unreadable token yields an
//! anonymous caller, and whether that caller may do anything is decided
//! by the access control service, not here.

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying the caller's access token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Header carrying the client-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller identity as presented on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No token, or one that could not be read as a header value.
    Anonymous,
    /// Raw token string; verification belongs to the access control service.
    Token(String),
}

impl Caller {
    pub fn token(&self) -> Option<&str> {
        match self {
            Caller::Anonymous => None,
            Caller::Token(t) => Some(t),
        }
    }
}

/// Ambient data propagated with every facade call.
///
/// Built fresh per request, never persisted, never shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub caller: Caller,
}

impl RequestContext {
    /// Derive a context from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let caller = headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| Caller::Token(v.to_owned()))
            .unwrap_or(Caller::Anonymous);

        RequestContext { request_id, caller }
    }
}
