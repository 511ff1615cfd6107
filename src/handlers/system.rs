use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "system"
)]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "environment": state.environment,
    }))
}

/// GET / and GET /api/info
#[utoipa::path(
    get,
    path = "/api/info",
    responses((status = 200, description = "API summary")),
    tag = "system"
)]
pub async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to Retail App API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "products": "/api/products",
            "orders": "/api/orders",
        },
    }))
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Route not found" }))
}
