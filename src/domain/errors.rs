use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Every rule the input violated, in the order they were checked.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Order not found")]
    OrderNotFound,
    /// A product referenced from an order request does not exist.
    #[error("Product {0} not found")]
    UnknownProduct(String),
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(String),
    #[error("Stock for product {0} would exceed the supported maximum")]
    StockOverflow(String),
    #[error("Invalid order status")]
    InvalidStatus,
    #[error("Cannot cancel completed order")]
    CannotCancelCompleted,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(vec![message.into()])
    }
}
