use std::collections::HashMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::LineItem;
use crate::domain::parse_id;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductUpdate};

pub struct ProductCatalog<R> {
    repo: R,
}

impl<R: ProductRepository> ProductCatalog<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut products = self.repo.list()?;
        products.retain(|p| filter.matches(p));
        Ok(products)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn create(&self, fields: NewProduct) -> Result<Product, DomainError> {
        let product = Product::create(fields)?;
        self.repo.insert(product.clone())?;
        log::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update(&self, id: Uuid, update: ProductUpdate) -> Result<Product, DomainError> {
        self.repo.transaction(|products| {
            let product = find_mut(products, id)?;
            product.apply(update)?;
            Ok(product.clone())
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.remove(id)? {
            log::info!("Deleted product {}", id);
            Ok(())
        } else {
            Err(DomainError::ProductNotFound)
        }
    }

    /// Applies a signed delta to one product's stock.
    pub fn adjust_stock(&self, id: Uuid, delta: i64) -> Result<Product, DomainError> {
        self.repo.transaction(|products| {
            let product = find_mut(products, id)?;
            product.adjust_stock(delta)?;
            Ok(product.clone())
        })
    }

    pub fn has_sufficient_stock(&self, id: Uuid, quantity: i64) -> Result<bool, DomainError> {
        self.repo
            .find_by_id(id)?
            .map(|p| p.has_stock_for(quantity))
            .ok_or(DomainError::ProductNotFound)
    }

    /// Resolves every `(product id, quantity)` pair, checks stock for all of
    /// them, then snapshots name and price and decrements stock. Runs as one
    /// transaction: on any failure no stock is touched.
    ///
    /// Stock is checked against the summed demand per product, so a product
    /// listed twice cannot be oversold.
    pub fn reserve(&self, lines: &[(&str, i64)]) -> Result<Vec<LineItem>, DomainError> {
        self.repo.transaction(|products| {
            let mut resolved = Vec::with_capacity(lines.len());
            for &(raw_id, quantity) in lines {
                let index = parse_id(raw_id)
                    .and_then(|id| products.iter().position(|p| p.id == id))
                    .ok_or_else(|| DomainError::UnknownProduct(raw_id.to_string()))?;
                resolved.push((index, quantity));
            }

            let mut demand: HashMap<usize, i64> = HashMap::new();
            for &(index, quantity) in &resolved {
                if quantity <= 0 {
                    return Err(DomainError::validation(
                        "Item quantity must be a positive integer",
                    ));
                }
                let product = &products[index];
                let wanted = demand.entry(index).or_insert(0);
                *wanted = wanted
                    .checked_add(quantity)
                    .filter(|total| product.has_stock_for(*total))
                    .ok_or_else(|| DomainError::InsufficientStock(product.name.clone()))?;
            }

            let items: Vec<LineItem> = resolved
                .iter()
                .map(|&(index, quantity)| LineItem {
                    product_id: products[index].id,
                    product_name: products[index].name.clone(),
                    quantity,
                    price: products[index].price.clone(),
                })
                .collect();

            // Every total was checked above, so these cannot fail.
            for (&index, &total) in &demand {
                products[index].adjust_stock(-total)?;
            }
            Ok(items)
        })
    }

    /// Puts the quantities of `items` back into stock. Lines whose product
    /// has since been deleted are skipped. Either every remaining line is
    /// restored or, when a total would overflow, none is.
    pub fn restore(&self, items: &[LineItem]) -> Result<(), DomainError> {
        self.repo.transaction(|products| {
            let mut returned: HashMap<usize, i64> = HashMap::new();
            for item in items {
                let Some(index) = products.iter().position(|p| p.id == item.product_id) else {
                    log::warn!(
                        "Product {} no longer exists; {} unit(s) not restored",
                        item.product_id,
                        item.quantity
                    );
                    continue;
                };
                let product = &products[index];
                let total = returned.entry(index).or_insert(0);
                *total = total
                    .checked_add(item.quantity)
                    .filter(|t| product.stock.checked_add(*t).is_some())
                    .ok_or_else(|| DomainError::StockOverflow(product.name.clone()))?;
            }

            for (&index, &total) in &returned {
                products[index].adjust_stock(total)?;
            }
            Ok(())
        })
    }
}

fn find_mut(products: &mut [Product], id: Uuid) -> Result<&mut Product, DomainError> {
    products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(DomainError::ProductNotFound)
}

/// The catalog a fresh deployment starts with.
pub fn sample_products() -> Vec<Product> {
    [
        ("Laptop", "High-performance laptop for professionals", "1299.99", 50, "Electronics"),
        ("Wireless Mouse", "Ergonomic wireless mouse", "29.99", 200, "Electronics"),
        ("Office Chair", "Comfortable ergonomic office chair", "249.99", 75, "Furniture"),
        ("Desk Lamp", "LED desk lamp with adjustable brightness", "39.99", 150, "Furniture"),
        ("Coffee Maker", "Programmable coffee maker", "79.99", 100, "Appliances"),
    ]
    .into_iter()
    .filter_map(|(name, description, price, stock, category)| {
        Product::create(NewProduct {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            price: BigDecimal::from_str(price).ok(),
            stock: Some(stock),
            category: Some(category.to_string()),
        })
        .ok()
    })
    .collect()
}
