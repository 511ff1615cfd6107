use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderFilter, OrderRequest, OrderStats, OrderStatus};
use crate::domain::ports::{OrderRepository, ProductRepository};

use super::catalog::ProductCatalog;

/// Places orders against the catalog and drives their status lifecycle.
///
/// Every mutating operation runs inside the order repository's transaction,
/// and any stock movement it causes runs inside one catalog transaction
/// nested within it. Locks are therefore always taken orders first, then
/// products.
pub struct OrderService<O, P> {
    repo: O,
    catalog: Arc<ProductCatalog<P>>,
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(repo: O, catalog: Arc<ProductCatalog<P>>) -> Self {
        Self { repo, catalog }
    }

    pub fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, DomainError> {
        let mut orders = self.repo.list()?;
        orders.retain(|o| filter.matches(o));
        Ok(orders)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn create(&self, request: OrderRequest) -> Result<Order, DomainError> {
        let errors = request.validate();
        if !errors.is_empty() {
            log::debug!("Rejected order request: {}", errors.join(", "));
            return Err(DomainError::Validation(errors));
        }
        let (Some(customer_name), Some(customer_email), Some(items)) =
            (request.customer_name, request.customer_email, request.items)
        else {
            return Err(DomainError::Internal(
                "validated order request is missing a field".to_string(),
            ));
        };
        let lines: Vec<(&str, i64)> = items
            .iter()
            .map(|item| (item.product_id.as_str(), item.quantity.unwrap_or_default()))
            .collect();

        let order = self.repo.transaction(|orders| {
            let snapshot = self.catalog.reserve(&lines)?;
            let order = Order::new(customer_name, customer_email, snapshot);
            orders.push(order.clone());
            Ok(order)
        })?;

        log::info!(
            "Created order {} for {} ({} line(s), total {})",
            order.order_number,
            order.customer_email,
            order.items.len(),
            order.total_amount
        );
        Ok(order)
    }

    /// Sets any recognised status. Transitions are not restricted here; only
    /// [`OrderService::cancel`] guards completed orders.
    pub fn update_status(&self, id: Uuid, status: &str) -> Result<Order, DomainError> {
        let order = self.repo.transaction(|orders| {
            let order = find_mut(orders, id)?;
            let status: OrderStatus = status.parse()?;
            order.set_status(status);
            Ok(order.clone())
        })?;
        log::info!("Order {} is now {}", order.order_number, order.status);
        Ok(order)
    }

    /// Cancels an order and returns its quantities to stock. Completed orders
    /// cannot be cancelled. Stock is returned unless an earlier cancel already
    /// did so, including orders set to `cancelled` through
    /// [`OrderService::update_status`].
    pub fn cancel(&self, id: Uuid) -> Result<Order, DomainError> {
        let order = self.repo.transaction(|orders| {
            let order = find_mut(orders, id)?;
            if order.status == OrderStatus::Completed {
                return Err(DomainError::CannotCancelCompleted);
            }
            if !order.stock_restored {
                self.catalog.restore(&order.items)?;
                order.stock_restored = true;
            }
            order.set_status(OrderStatus::Cancelled);
            Ok(order.clone())
        })?;
        log::info!("Cancelled order {}", order.order_number);
        Ok(order)
    }

    pub fn stats(&self) -> Result<OrderStats, DomainError> {
        let orders = self.repo.list()?;
        Ok(OrderStats::from_orders(&orders))
    }
}

fn find_mut(orders: &mut [Order], id: Uuid) -> Result<&mut Order, DomainError> {
    orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or(DomainError::OrderNotFound)
}
