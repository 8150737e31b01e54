use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::actor_framework::StoreError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

/// The one place error kinds become HTTP status codes.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    kind: &'static str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "validation",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not_found",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateId { .. } => Self {
                status: StatusCode::CONFLICT,
                kind: "conflict",
                message: error.to_string(),
            },
            _ => {
                tracing::error!(error = %error, "Store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    kind: "store",
                    message: error.to_string(),
                }
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::Validation(_) => Self::bad_request(error.to_string()),
            OrderError::NotFound(_) => Self::not_found(error.to_string()),
            OrderError::Store(e) => e.into(),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::Validation(_) => Self::bad_request(error.to_string()),
            ProductError::NotFound(_) => Self::not_found(error.to_string()),
            ProductError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            kind: self.kind,
        };
        (self.status, Json(body)).into_response()
    }
}
