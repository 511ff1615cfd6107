use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(DomainError::InvalidStatus)
    }
}

/// A product line frozen at the moment the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    #[serde(with = "crate::money")]
    #[schema(value_type = f64)]
    pub price: BigDecimal,
}

impl LineItem {
    pub fn subtotal(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<LineItem>,
    #[serde(with = "crate::money")]
    #[schema(value_type = f64)]
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once cancelling has put the line quantities back into stock.
    #[serde(skip)]
    pub stock_restored: bool,
}

impl Order {
    /// Creates a pending order; the total is computed once from the snapshots.
    pub fn new(customer_name: String, customer_email: String, items: Vec<LineItem>) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let total_amount = items
            .iter()
            .fold(BigDecimal::zero(), |total, item| total + item.subtotal());
        Self {
            id,
            order_number: order_number(now, id),
            customer_name,
            customer_email,
            items,
            total_amount,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            stock_restored: false,
        }
    }

    /// Moving away from `cancelled` means the stock may be owed again.
    pub fn set_status(&mut self, status: OrderStatus) {
        if status != OrderStatus::Cancelled {
            self.stock_restored = false;
        }
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// `ORD-<unix millis>-<id prefix>`; the id prefix separates orders placed in
/// the same millisecond.
fn order_number(created_at: DateTime<Utc>, id: Uuid) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("ORD-{}-{}", created_at.timestamp_millis(), &simple[..8])
}

#[derive(Debug, Clone)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

impl OrderRequest {
    /// Structural checks only; product existence and stock are checked
    /// against the catalog.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let name = self.customer_name.as_deref().unwrap_or("");
        if name.trim().is_empty() {
            errors.push("Customer name is required".to_string());
        }
        let email = self.customer_email.as_deref().unwrap_or("");
        if !email.contains('@') {
            errors.push("Valid customer email is required".to_string());
        }
        match self.items.as_deref() {
            None | Some([]) => errors.push("Order must contain at least one item".to_string()),
            Some(items) => {
                if items.iter().any(|i| i.product_id.trim().is_empty()) {
                    errors.push("Item productId is required".to_string());
                }
                if items.iter().any(|i| i.quantity.map_or(true, |q| q <= 0)) {
                    errors.push("Item quantity must be a positive integer".to_string());
                }
            }
        }
        errors
    }
}

/// `status` is compared verbatim, so an unrecognised value matches nothing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub customer_email: Option<String>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = &self.status {
            if order.status.as_str() != status {
                return false;
            }
        }
        if let Some(email) = &self.customer_email {
            let needle = email.to_lowercase();
            if !order.customer_email.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::Pending => self.pending += 1,
            OrderStatus::Processing => self.processing += 1,
            OrderStatus::Completed => self.completed += 1,
            OrderStatus::Cancelled => self.cancelled += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    #[serde(with = "crate::money")]
    #[schema(value_type = f64)]
    pub total_revenue: BigDecimal,
    pub orders_by_status: StatusCounts,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = OrderStats {
            total_orders: 0,
            total_revenue: BigDecimal::zero(),
            orders_by_status: StatusCounts::default(),
        };
        for order in orders {
            stats.total_orders += 1;
            stats.orders_by_status.record(order.status);
            if order.status != OrderStatus::Cancelled {
                stats.total_revenue = &stats.total_revenue + &order.total_amount;
            }
        }
        stats
    }
}
