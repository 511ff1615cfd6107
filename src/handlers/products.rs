use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductUpdate};
use crate::errors::AppError;
use crate::AppState;

use super::{ok, path_id, ApiResponse};

const PRODUCT_NOT_FOUND: &str = "Product not found";

// ── Request DTOs ─────────────────────────────────────────────────────────────

/// Body of both create and update. Absent or `null` fields are not supplied.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::money::option::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<BigDecimal>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

impl From<ProductPayload> for NewProduct {
    fn from(p: ProductPayload) -> Self {
        NewProduct {
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category: p.category,
        }
    }
}

impl From<ProductPayload> for ProductUpdate {
    fn from(p: ProductPayload) -> Self {
        ProductUpdate {
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category: p.category,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ProductQuery {
    /// Empty values count as absent; non-numeric bounds are rejected together.
    pub fn into_filter(self) -> Result<ProductFilter, DomainError> {
        let mut errors = Vec::new();
        let mut bound = |raw: Option<String>, name: &str| -> Option<BigDecimal> {
            let raw = raw.filter(|v| !v.trim().is_empty())?;
            match BigDecimal::from_str(raw.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.push(format!("{} must be a number", name));
                    None
                }
            }
        };
        let min_price = bound(self.min_price, "minPrice");
        let max_price = bound(self.max_price, "maxPrice");
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        Ok(ProductFilter {
            category: self.category.filter(|c| !c.is_empty()),
            min_price,
            max_price,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category" = Option<String>, Query, description = "Exact category match"),
        ("minPrice" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Inclusive upper price bound"),
    ),
    responses(
        (status = 200, description = "Products in insertion order", body = [Product]),
        (status = 400, description = "Non-numeric price bound"),
    ),
    tag = "products"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let products = state.catalog.list(&filter)?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(products)))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_id(&path, PRODUCT_NOT_FOUND)?;
    match state.catalog.get(id)? {
        Some(product) => Ok(ok(product)),
        None => Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string())),
    }
}

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failed"),
    ),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let product = state.catalog.create(body.into_inner().into())?;
    Ok(HttpResponse::Created().json(ApiResponse::data(product)))
}

/// PUT /api/products/{id}
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path_id(&path, PRODUCT_NOT_FOUND)?;
    let product = state.catalog.update(id, body.into_inner().into())?;
    Ok(ok(product))
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_id(&path, PRODUCT_NOT_FOUND)?;
    state.catalog.delete(id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Product deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(min: Option<&str>, max: Option<&str>) -> ProductQuery {
        ProductQuery {
            category: None,
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
        }
    }

    #[test]
    fn empty_query_values_are_ignored() {
        let filter = ProductQuery {
            category: Some(String::new()),
            ..query(Some(""), Some(" "))
        }
        .into_filter()
        .unwrap();
        assert!(filter.category.is_none());
        assert!(filter.min_price.is_none());
        assert!(filter.max_price.is_none());
    }

    #[test]
    fn numeric_bounds_are_parsed() {
        let filter = query(Some("10"), Some("99.5")).into_filter().unwrap();
        assert_eq!(filter.min_price, Some(BigDecimal::from(10)));
        assert_eq!(filter.max_price, BigDecimal::from_str("99.5").ok());
    }

    #[test]
    fn bad_bounds_are_reported_together() {
        let err = query(Some("cheap"), Some("pricey")).into_filter().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(vec![
                "minPrice must be a number".to_string(),
                "maxPrice must be a number".to_string(),
            ])
        );
    }

    #[test]
    fn payload_distinguishes_absent_from_present() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"description": "", "price": 12.5}"#).unwrap();
        let update = ProductUpdate::from(payload);
        assert!(update.name.is_none());
        assert_eq!(update.description.as_deref(), Some(""));
        assert_eq!(update.price, BigDecimal::from_str("12.5").ok());
        assert!(update.stock.is_none());
    }

    mod routes {
        use actix_web::http::StatusCode;
        use actix_web::{test, web, App};
        use serde_json::{json, Value};

        use crate::{configure, AppConfig, AppState};

        fn state() -> web::Data<AppState> {
            web::Data::new(AppState::new(&AppConfig::default()))
        }

        #[actix_web::test]
        async fn list_wraps_products_in_the_envelope() {
            let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
            let req = test::TestRequest::get()
                .uri("/api/products?category=Furniture")
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["count"], 2);
            assert_eq!(body["data"][0]["name"], "Office Chair");
        }

        #[actix_web::test]
        async fn non_uuid_id_is_product_not_found() {
            let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
            let req = test::TestRequest::get()
                .uri("/api/products/not-a-uuid")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"success": false, "error": "Product not found"}));
        }

        #[actix_web::test]
        async fn invalid_create_lists_every_violation() {
            let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
            let req = test::TestRequest::post()
                .uri("/api/products")
                .set_json(json!({"price": -1, "stock": -5}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["details"].as_array().map(Vec::len), Some(3));
        }

        #[actix_web::test]
        async fn bad_price_bound_is_a_client_error() {
            let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
            let req = test::TestRequest::get()
                .uri("/api/products?minPrice=cheap")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
