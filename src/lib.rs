pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod money;

use std::sync::Arc;
use std::time::Instant;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog::sample_products;
use application::{OrderService, ProductCatalog};
use infrastructure::{InMemoryOrderRepository, InMemoryProductRepository};

pub use config::AppConfig;

pub type Catalog = ProductCatalog<InMemoryProductRepository>;
pub type Orders = OrderService<InMemoryOrderRepository, InMemoryProductRepository>;

/// Everything the handlers share. Each instance owns its own stores, so
/// independent servers (or tests) never see each other's data.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub orders: Orders,
    pub started_at: Instant,
    pub environment: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let products = if config.seed_sample_data {
            sample_products()
        } else {
            Vec::new()
        };
        let catalog = Arc::new(ProductCatalog::new(
            InMemoryProductRepository::with_products(products),
        ));
        let orders = OrderService::new(InMemoryOrderRepository::new(), catalog.clone());
        Self {
            catalog,
            orders,
            started_at: Instant::now(),
            environment: config.environment.clone(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::system::health,
        handlers::system::api_info,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::list_orders,
        handlers::orders::order_stats,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order_status,
        handlers::orders::cancel_order,
    ),
    components(schemas(
        domain::product::Product,
        domain::order::Order,
        domain::order::LineItem,
        domain::order::OrderStatus,
        domain::order::OrderStats,
        domain::order::StatusCounts,
        handlers::products::ProductPayload,
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreateOrderItem,
        handlers::orders::UpdateStatusRequest,
    )),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order placement and lifecycle"),
        (name = "system", description = "Liveness and API summary"),
    )
)]
pub struct ApiDoc;

/// Registers every API route. Shared by [`build_server`] and in-process tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{orders, products, system};

    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| handlers::bad_request(err)))
        .app_data(
            web::QueryConfig::default().error_handler(|err, _req| handlers::bad_request(err)),
        )
        .route("/", web::get().to(system::api_info))
        .route("/health", web::get().to(system::health))
        .route("/api/info", web::get().to(system::api_info))
        .service(
            web::scope("/api/products")
                .route("", web::get().to(products::list_products))
                .route("", web::post().to(products::create_product))
                .route("/{id}", web::get().to(products::get_product))
                .route("/{id}", web::put().to(products::update_product))
                .route("/{id}", web::delete().to(products::delete_product)),
        )
        .service(
            web::scope("/api/orders")
                .route("", web::get().to(orders::list_orders))
                .route("", web::post().to(orders::create_order))
                .route("/stats", web::get().to(orders::order_stats))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}/status", web::patch().to(orders::update_order_status))
                .route("/{id}/cancel", web::post().to(orders::cancel_order)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .default_service(web::route().to(handlers::system::route_not_found))
    })
    .bind((host.to_string(), port))?
    .run())
}
