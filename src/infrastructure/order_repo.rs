use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;

use super::memory::MemoryTable;

pub struct InMemoryOrderRepository {
    table: MemoryTable<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.table
            .read(|orders| orders.iter().find(|o| o.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        self.table.read(|orders| orders.to_vec())
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<Order>) -> Result<T, DomainError>,
    {
        self.table.write(f)
    }
}
