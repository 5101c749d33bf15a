use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

/// What every handler hands back: a status plus the JSON envelope, or an
/// [`ApiError`] that renders its own envelope.
pub type Reply<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Uniform JSON envelope. Members left as `None` are not serialized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub(crate) ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn from_data(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            msg: None,
            error: None,
        }
    }

    pub fn from_message(msg: String) -> Self {
        Self {
            ok: true,
            data: None,
            msg: Some(msg),
            error: None,
        }
    }

    pub fn with_status(self, status: StatusCode) -> Reply<T> {
        Ok((status, Json(self)))
    }
}

impl ApiResponse<()> {
    pub fn failure(msg: String, error: Option<String>) -> Self {
        Self {
            ok: false,
            data: None,
            msg: Some(msg),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_members_are_omitted() {
        let body = serde_json::to_value(ApiResponse::<()>::from_message("done".to_string())).unwrap();
        assert_eq!(body, json!({ "ok": true, "msg": "done" }));
    }

    #[test]
    fn failure_carries_error_detail() {
        let response = ApiResponse::failure("Internal Server Error".to_string(), Some("boom".to_string()));
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(
            body,
            json!({ "ok": false, "msg": "Internal Server Error", "error": "boom" })
        );
    }

    #[test]
    fn data_envelope() {
        let body = serde_json::to_value(ApiResponse::from_data(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "ok": true, "data": [1, 2] }));
    }
}
