use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::ProductNotFound | DomainError::OrderNotFound => {
                AppError::NotFound(message)
            }
            DomainError::UnknownProduct(_)
            | DomainError::InsufficientStock(_)
            | DomainError::StockOverflow(_)
            | DomainError::InvalidStatus
            | DomainError::CannotCancelCompleted => AppError::BadRequest(message),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "details": errors,
            }),
            AppError::NotFound(_) | AppError::BadRequest(_) => serde_json::json!({
                "success": false,
                "error": self.to_string(),
            }),
            AppError::Internal(msg) => {
                log::error!("Request failed: {}", msg);
                serde_json::json!({
                    "success": false,
                    "error": "Internal server error",
                })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
