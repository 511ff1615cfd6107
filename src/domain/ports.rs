use uuid::Uuid;

use super::errors::DomainError;
use super::order::Order;
use super::product::Product;

/// Storage for products, kept in insertion order.
pub trait ProductRepository: Send + Sync + 'static {
    fn insert(&self, product: Product) -> Result<(), DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn remove(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Runs `f` with exclusive access to every product. Nothing is rolled
    /// back, so `f` must do all of its checks before it changes a product.
    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<Product>) -> Result<T, DomainError>;
}

/// Storage for orders, kept in insertion order.
pub trait OrderRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn list(&self) -> Result<Vec<Order>, DomainError>;

    /// Same contract as [`ProductRepository::transaction`].
    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<Order>) -> Result<T, DomainError>;
}
