//! Semantic result codes shared with the access control service.
//!
//! Codes are six-digit numbers whose leading three digits are the HTTP
//! status they encode as. The adapter itself only ever produces
//! `EXECUTE_SUCCESS` and `PARSE_EXCEPTION`; everything else originates in
//! the access control service and passes through unchanged.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Semantic result code carried in every response envelope.
///
/// The set is open: the access control service may return codes this
/// crate has no constant for, and they are encoded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCode(pub u32);

impl ResultCode {
    /// Operation completed.
    pub const EXECUTE_SUCCESS: ResultCode = ResultCode(200_000);

    /// Request body or query did not match the expected shape.
    /// Produced locally, before the access control service is invoked.
    pub const PARSE_EXCEPTION: ResultCode = ResultCode(400_001);

    /// Request carried no usable payload.
    pub const EMPTY_REQUEST: ResultCode = ResultCode(400_002);

    /// A field failed semantic validation in the access control service.
    pub const INVALID_PARAMETER: ResultCode = ResultCode(400_004);

    /// Credentials or token rejected.
    pub const UNAUTHORIZED: ResultCode = ResultCode(401_000);

    /// The presented token exists but has been disabled.
    pub const TOKEN_DISABLED: ResultCode = ResultCode(401_002);

    /// Caller is authenticated but not permitted to perform the operation.
    pub const NOT_ALLOWED_ACCESS: ResultCode = ResultCode(403_001);

    /// Referenced principal or strategy does not exist.
    pub const NOT_FOUND: ResultCode = ResultCode(404_001);

    /// A principal or strategy with the same identity already exists.
    pub const ALREADY_EXISTS: ResultCode = ResultCode(409_001);

    /// Unclassified failure inside the access control service.
    pub const EXECUTE_EXCEPTION: ResultCode = ResultCode(500_000);

    /// HTTP status for this code: the leading three digits, or 500 when
    /// they do not form a valid status. Total over all possible codes.
    pub fn http_status(self) -> StatusCode {
        u16::try_from(self.0 / 1000)
            .ok()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Canonical message for codes this crate knows about.
    pub fn default_info(self) -> Option<&'static str> {
        match self {
            ResultCode::EXECUTE_SUCCESS => Some("execute success"),
            ResultCode::PARSE_EXCEPTION => Some("parse exception"),
            ResultCode::EMPTY_REQUEST => Some("empty request"),
            ResultCode::INVALID_PARAMETER => Some("invalid parameter"),
            ResultCode::UNAUTHORIZED => Some("unauthorized"),
            ResultCode::TOKEN_DISABLED => Some("token disabled"),
            ResultCode::NOT_ALLOWED_ACCESS => Some("not allowed access"),
            ResultCode::NOT_FOUND => Some("not found"),
            ResultCode::ALREADY_EXISTS => Some("already exists"),
            ResultCode::EXECUTE_EXCEPTION => Some("execute exception"),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self.http_status().is_success()
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        ResultCode::EXECUTE_SUCCESS
    }
}

impl From<u32> for ResultCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_maps_to_200() {
        assert_eq!(ResultCode::EXECUTE_SUCCESS.http_status(), StatusCode::OK);
    }

    #[test]
    fn parse_exception_maps_to_400() {
        assert_eq!(
            ResultCode::PARSE_EXCEPTION.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn passthrough_codes_keep_their_status_class() {
        assert_eq!(
            ResultCode::UNAUTHORIZED.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ResultCode::NOT_FOUND.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ResultCode::EXECUTE_EXCEPTION.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_code_falls_back_to_500() {
        assert_eq!(
            ResultCode(7_000_000).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ResultCode(42).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
