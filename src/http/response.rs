//! Response encoding.
//!
//! # Responsibilities
//! - Render an operation result into the wire envelope
//! - Derive the HTTP status from the semantic result code
//! - Encode decode failures as `ParseException` envelopes
//!
//! # Design Decisions
//! - The status mapping is total: every code encodes to exactly one
//!   status, unknown codes to 500
//! - The envelope is written once per request; facade codes are never
//!   translated or suppressed on the way out

use axum::response::{IntoResponse, Json, Response};

use crate::http::request::ParseError;
use crate::model::{ApiResponse, ResultCode};

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.code.http_status(), Json(self)).into_response()
    }
}

impl IntoResponse for ParseError {
    fn into_response(self) -> Response {
        ApiResponse::with_info(ResultCode::PARSE_EXCEPTION, self.to_string()).into_response()
    }
}
