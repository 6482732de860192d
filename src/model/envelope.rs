//! The standard response envelope.
//!
//! Every endpoint answers with the same shape: a semantic `code`, an
//! optional human-readable `info`, and whatever payload fields the
//! operation produces. Batch writes additionally carry a positional
//! `responses` list whose order matches the input batch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::code::ResultCode;

/// Wire envelope for every operation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub code: ResultCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Feature switches, used by the auth-status endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
    /// Operation-specific payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Total matching records for paginated queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Records returned in this page, or items in this batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Per-item outcomes for batch writes, in input order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<ApiResponse>>,
}

impl ApiResponse {
    /// Envelope for `code` with its canonical message.
    pub fn new(code: ResultCode) -> Self {
        ApiResponse {
            code,
            info: code.default_info().map(str::to_owned),
            ..ApiResponse::default()
        }
    }

    /// Plain success envelope.
    pub fn ok() -> Self {
        ApiResponse::new(ResultCode::EXECUTE_SUCCESS)
    }

    /// Envelope for `code` with a caller-supplied message.
    pub fn with_info(code: ResultCode, info: impl Into<String>) -> Self {
        ApiResponse {
            code,
            info: Some(info.into()),
            ..ApiResponse::default()
        }
    }

    /// Attach a payload value.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a feature switch.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Aggregate envelope over per-item outcomes, preserving their order.
    ///
    /// The aggregate code is success only when every item succeeded;
    /// otherwise the first failing item's code is surfaced.
    pub fn batch_write(responses: Vec<ApiResponse>) -> Self {
        let code = responses
            .iter()
            .map(|r| r.code)
            .find(|c| !c.is_success())
            .unwrap_or(ResultCode::EXECUTE_SUCCESS);
        ApiResponse {
            size: Some(responses.len() as u64),
            responses: Some(responses),
            ..ApiResponse::new(code)
        }
    }

    /// Paginated query envelope.
    pub fn batch_query(amount: u64, data: Value, size: u64) -> Self {
        ApiResponse {
            amount: Some(amount),
            size: Some(size),
            data: Some(data),
            ..ApiResponse::ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_write_surfaces_first_failure() {
        let agg = ApiResponse::batch_write(vec![
            ApiResponse::ok(),
            ApiResponse::new(ResultCode::NOT_FOUND),
            ApiResponse::new(ResultCode::ALREADY_EXISTS),
        ]);
        assert_eq!(agg.code, ResultCode::NOT_FOUND);
        assert_eq!(agg.size, Some(3));
        assert_eq!(agg.responses.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn batch_write_all_success() {
        let agg = ApiResponse::batch_write(vec![ApiResponse::ok(), ApiResponse::ok()]);
        assert_eq!(agg.code, ResultCode::EXECUTE_SUCCESS);
    }

    #[test]
    fn envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::ok()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.get("code"), Some(&serde_json::json!(200_000)));
        assert!(!obj.contains_key("data"));
        assert!(!obj.contains_key("responses"));
    }
}
