use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::order::{Order, OrderFilter, OrderItemRequest, OrderRequest, OrderStats};
use crate::errors::AppError;
use crate::AppState;

use super::{ok, path_id, ApiResponse};

const ORDER_NOT_FOUND: &str = "Order not found";

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    #[serde(default)]
    pub product_id: String,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Option<Vec<CreateOrderItem>>,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(body: CreateOrderRequest) -> Self {
        OrderRequest {
            customer_name: body.customer_name,
            customer_email: body.customer_email,
            items: body.items.map(|items| {
                items
                    .into_iter()
                    .map(|i| OrderItemRequest {
                        product_id: i.product_id,
                        quantity: i.quantity,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub status: Option<String>,
    pub customer_email: Option<String>,
}

impl From<OrderQuery> for OrderFilter {
    fn from(q: OrderQuery) -> Self {
        OrderFilter {
            status: q.status.filter(|s| !s.is_empty()),
            customer_email: q.customer_email.filter(|e| !e.is_empty()),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<String>, Query, description = "Exact status match"),
        ("customerEmail" = Option<String>, Query, description = "Case-insensitive substring of the customer email"),
    ),
    responses(
        (status = 200, description = "Orders in creation order", body = [Order]),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = state.orders.list(&query.into_inner().into())?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(orders)))
}

/// GET /api/orders/stats
#[utoipa::path(
    get,
    path = "/api/orders/stats",
    responses(
        (status = 200, description = "Order counts and revenue", body = OrderStats),
    ),
    tag = "orders"
)]
pub async fn order_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(ok(state.orders.stats()?))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_id(&path, ORDER_NOT_FOUND)?;
    match state.orders.get(id)? {
        Some(order) => Ok(ok(order)),
        None => Err(AppError::NotFound(ORDER_NOT_FOUND.to_string())),
    }
}

/// POST /api/orders
///
/// Validates the request, checks every item against the catalog and only
/// then decrements stock, so a rejected order leaves the catalog unchanged.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Invalid request, unknown product or insufficient stock"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let request: OrderRequest = body.into_inner().into();
    let order = web::block(move || state.orders.create(request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Created().json(ApiResponse::data(order)))
}

/// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(("id" = String, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 400, description = "Missing or unrecognised status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let Some(status) = body.into_inner().status.filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("Status is required".to_string()));
    };
    let id = path_id(&path, ORDER_NOT_FOUND)?;
    let order = web::block(move || state.orders.update_status(id, &status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(ok(order))
}

/// POST /api/orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled and stock restored", body = Order),
        (status = 400, description = "Order is completed"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_id(&path, ORDER_NOT_FOUND)?;
    let order = web::block(move || state.orders.cancel(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(ok(order))
}
