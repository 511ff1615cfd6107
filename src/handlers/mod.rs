pub mod orders;
pub mod products;
pub mod system;

use actix_web::HttpResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::parse_id;
use crate::errors::AppError;

// ── Response envelope ────────────────────────────────────────────────────────

/// `{success, data?, count?, message?}`; errors use the same shape via
/// [`AppError`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            message: Some(message.into()),
        }
    }
}

/// Extractor failures (malformed JSON, bad query strings) share the envelope.
pub fn bad_request(err: impl std::fmt::Display) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Path ids that are not UUIDs cannot exist, so they resolve to `not_found`.
pub(crate) fn path_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    parse_id(raw).ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::data(data))
}
