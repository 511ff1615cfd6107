pub mod memory;
pub mod order_repo;
pub mod product_repo;

pub use order_repo::InMemoryOrderRepository;
pub use product_repo::InMemoryProductRepository;
