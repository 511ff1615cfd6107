use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;

use super::memory::MemoryTable;

pub struct InMemoryProductRepository {
    table: MemoryTable<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            table: MemoryTable::with_rows(products),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn insert(&self, product: Product) -> Result<(), DomainError> {
        self.table.write(|products| {
            products.push(product);
            Ok(())
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        self.table
            .read(|products| products.iter().find(|p| p.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.table.read(|products| products.to_vec())
    }

    fn remove(&self, id: Uuid) -> Result<bool, DomainError> {
        self.table.write(|products| {
            let before = products.len();
            products.retain(|p| p.id != id);
            Ok(products.len() != before)
        })
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<Product>) -> Result<T, DomainError>,
    {
        self.table.write(f)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::product::NewProduct;

    fn product(name: &str) -> Product {
        Product::create(NewProduct {
            name: Some(name.to_string()),
            price: Some(BigDecimal::from_str("9.99").unwrap()),
            stock: Some(1),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let repo = InMemoryProductRepository::new();
        for name in ["c", "a", "b"] {
            repo.insert(product(name)).unwrap();
        }
        let names: Vec<String> = repo.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn find_by_id_returns_none_for_unknown_id() {
        let repo = InMemoryProductRepository::with_products(vec![product("a")]);
        assert!(repo.find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn remove_reports_whether_a_row_was_deleted() {
        let p = product("a");
        let id = p.id;
        let repo = InMemoryProductRepository::with_products(vec![p]);
        assert!(repo.remove(id).unwrap());
        assert!(!repo.remove(id).unwrap());
        assert!(repo.list().unwrap().is_empty());
    }
}
