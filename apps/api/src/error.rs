//! # API Error Type
//!
//! Every failure leaves the server in one envelope:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": {
//!     "code": "NOT_FOUND",
//!     "message": "Gym not found: 6f1c...",
//!     "timestamp": "2026-01-01T12:00:00Z",
//!     "requestId": "b3a1..."
//!   }
//! }
//! ```
//!
//! `details` carries the offending field for validation errors. `stack`
//! holds the debug rendering of the source error and is only filled in
//! development.
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────────────────────────────┬────────┐
//! │ NotFound (incl. other tenant's row on read)  │ 404    │
//! │ Forbidden (other tenant's row on write)      │ 403    │
//! │ Duplicate / still referenced                 │ 409    │
//! │ Validation / missing reference / empty batch │ 400    │
//! │ Unauthorized                                 │ 401    │
//! │ anything else                                │ 500    │
//! └──────────────────────────────────────────────┴────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use roster_service::ServiceError;
use serde_json::{json, Value};
use tracing::error;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
    pub request_id: Option<String>,
    pub stack: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
            details: None,
            request_id: None,
            stack: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Translates a service error. `debug` attaches the stack rendering.
    pub fn from_service(err: ServiceError, debug: bool) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let details = match &err {
            ServiceError::Validation(validation) => Some(json!({ "field": validation.field() })),
            _ => None,
        };

        let message = if status.is_server_error() {
            error!(error = %err, "Request failed");
            // Driver text stays in the logs
            "An unexpected error occurred".to_string()
        } else {
            err.to_string()
        };

        ApiError {
            status,
            code: err.code(),
            message,
            details,
            request_id: None,
            stack: debug.then(|| format!("{err:?}")),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::from_service(err, false)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
            "timestamp": Utc::now().to_rfc3339(),
            "requestId": self.request_id,
        });

        if let Some(details) = self.details {
            error["details"] = details;
        }
        if let Some(stack) = self.stack {
            error["stack"] = Value::String(stack);
        }

        (self.status, Json(json!({ "success": false, "error": error }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
