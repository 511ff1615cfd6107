pub mod catalog;
pub mod order_service;

pub use catalog::ProductCatalog;
pub use order_service::OrderService;
