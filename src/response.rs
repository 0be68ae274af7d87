//! JSON response envelope shared by every endpoint.
//!
//! Transport-level status is always 200 OK; the numeric `code` field carries
//! the real outcome, with `errMsg` and `data` present only when set. HTTP
//! status codes are reserved for transport failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{self, INTERNAL_ERROR_KEY, NEED_LOGIN_KEY, NO_PERMISSION_KEY};
use crate::rescode::ResCode;

/// The envelope serialized for every response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    code: u32,
    #[serde(rename = "errMsg", skip_serializing_if = "Option::is_none")]
    err_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Success with no payload.
    pub fn ok() -> ApiResponse {
        ApiResponse {
            code: ResCode::Success.as_u32(),
            err_msg: None,
            data: None,
        }
    }

    /// Success carrying a payload.
    ///
    /// A payload that fails to serialize degrades to an internal-error
    /// envelope rather than a transport failure.
    pub fn data(payload: impl Serialize) -> ApiResponse {
        match serde_json::to_value(payload) {
            Ok(value) => ApiResponse {
                code: ResCode::Success.as_u32(),
                err_msg: None,
                data: Some(value),
            },
            Err(err) => {
                tracing::error!(error = %err, "response payload failed to serialize");
                ApiResponse::internal_error()
            }
        }
    }

    /// A user-level mistake with a displayable (already localized) message.
    pub fn bad_request(msg: impl Into<String>) -> ApiResponse {
        ApiResponse::err_msg(ResCode::BadRequest.as_u32(), msg)
    }

    /// Authentication required.
    pub fn need_login() -> ApiResponse {
        ApiResponse::err_msg(ResCode::NeedLogin.as_u32(), NEED_LOGIN_KEY)
    }

    /// Permission denied.
    pub fn no_permission() -> ApiResponse {
        ApiResponse::err_msg(ResCode::NoPermission.as_u32(), NO_PERMISSION_KEY)
    }

    /// Broken protocol usage.
    pub fn invalid_request(msg: impl Into<String>) -> ApiResponse {
        ApiResponse::err_msg(ResCode::InvalidRequest.as_u32(), msg)
    }

    /// Server-side failure.
    pub fn internal_error() -> ApiResponse {
        ApiResponse::err_msg(ResCode::Internal.as_u32(), INTERNAL_ERROR_KEY)
    }

    /// An error envelope with an explicit code and message.
    pub fn err_msg(code: u32, msg: impl Into<String>) -> ApiResponse {
        ApiResponse {
            code,
            err_msg: Some(msg.into()),
            data: None,
        }
    }

    /// Classify and localize an error into its envelope.
    ///
    /// `None` produces the success envelope. An empty resolved message (the
    /// opaque categories) serializes with no `errMsg` field at all.
    pub fn from_err(err: Option<&anyhow::Error>, lang: &str) -> ApiResponse {
        let (code, message) = error::resolve(err, lang);
        ApiResponse {
            code: code.as_u32(),
            err_msg: (!message.is_empty()).then_some(message),
            data: None,
        }
    }

    /// The numeric outcome code of this envelope.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The client-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use anyhow::anyhow;
    use serde_json::{json, Value};

    fn to_json(response: &ApiResponse) -> Value {
        serde_json::to_value(response).expect("envelope should serialize")
    }

    // ==================== Shape Tests ====================

    #[test]
    fn test_ok_has_only_code() {
        let body = to_json(&ApiResponse::ok());
        assert_eq!(body, json!({"code": 2000}));
    }

    #[test]
    fn test_data_includes_payload() {
        let body = to_json(&ApiResponse::data(json!({"user": "u1"})));
        assert_eq!(body, json!({"code": 2000, "data": {"user": "u1"}}));
    }

    #[test]
    fn test_error_envelope_uses_err_msg_field() {
        let body = to_json(&ApiResponse::bad_request("bad field"));
        assert_eq!(body, json!({"code": 4000, "errMsg": "bad field"}));
    }

    #[test]
    fn test_fixed_helpers_carry_canonical_keys() {
        let body = to_json(&ApiResponse::need_login());
        assert_eq!(body, json!({"code": 4001, "errMsg": "need.login"}));

        let body = to_json(&ApiResponse::no_permission());
        assert_eq!(body, json!({"code": 4002, "errMsg": "no.permission"}));

        let body = to_json(&ApiResponse::internal_error());
        assert_eq!(body, json!({"code": 5000, "errMsg": "internal.error"}));
    }

    #[test]
    fn test_err_msg_helper_is_verbatim() {
        let body = to_json(&ApiResponse::err_msg(4003, "proto.mismatch"));
        assert_eq!(body, json!({"code": 4003, "errMsg": "proto.mismatch"}));
    }

    // ==================== from_err Tests ====================

    #[test]
    fn test_from_err_none_is_success() {
        let body = to_json(&ApiResponse::from_err(None, "en"));
        assert_eq!(body, json!({"code": 2000}));
    }

    #[test]
    fn test_from_err_untagged_error_is_opaque() {
        let err = anyhow!("connection reset by 10.0.0.3");
        let response = ApiResponse::from_err(Some(&err), "en");
        assert_eq!(response.code(), 5000);
        assert_eq!(response.message(), None);
        // No detail may appear anywhere in the serialized body.
        assert_eq!(to_json(&response), json!({"code": 5000}));
    }

    #[test]
    fn test_from_err_transparent_category() {
        let err = anyhow::Error::new(ApiError::need_login());
        let body = to_json(&ApiResponse::from_err(Some(&err), "en"));
        assert_eq!(body, json!({"code": 4001, "errMsg": "need.login"}));
    }

    // ==================== Transport Tests ====================

    #[tokio::test]
    async fn test_into_response_is_always_http_ok() {
        for envelope in [
            ApiResponse::ok(),
            ApiResponse::bad_request("bad field"),
            ApiResponse::internal_error(),
        ] {
            let response = envelope.into_response();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_into_response_serializes_envelope_body() {
        let response = ApiResponse::bad_request("bad field").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        let body: Value = serde_json::from_slice(&bytes).expect("body should be JSON");
        assert_eq!(body, json!({"code": 4000, "errMsg": "bad field"}));
    }
}
