use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "crate::money")]
    #[schema(value_type = f64)]
    pub price: BigDecimal,
    pub stock: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated fields for a new product. `None` means the field was not supplied.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

/// Partial update. Only `Some` fields are applied; an empty description or
/// category clears it.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(min) = &self.min_price {
            if product.price < *min {
                return false;
            }
        }
        if let Some(max) = &self.max_price {
            if product.price > *max {
                return false;
            }
        }
        true
    }
}

const NAME_REQUIRED: &str = "Product name is required";
const PRICE_POSITIVE: &str = "Price must be a positive number";
const STOCK_NON_NEGATIVE: &str = "Stock must be a non-negative number";

fn check_name(name: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }
}

fn check_price(price: &BigDecimal, errors: &mut Vec<String>) {
    if *price <= BigDecimal::zero() {
        errors.push(PRICE_POSITIVE.to_string());
    }
}

fn check_stock(stock: i64, errors: &mut Vec<String>) {
    if stock < 0 {
        errors.push(STOCK_NON_NEGATIVE.to_string());
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl NewProduct {
    /// Returns every violated rule; an empty list means the fields are valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_name(self.name.as_deref().unwrap_or(""), &mut errors);
        match &self.price {
            Some(price) => check_price(price, &mut errors),
            None => errors.push(PRICE_POSITIVE.to_string()),
        }
        match self.stock {
            Some(stock) => check_stock(stock, &mut errors),
            None => errors.push(STOCK_NON_NEGATIVE.to_string()),
        }
        errors
    }
}

impl ProductUpdate {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(price) = &self.price {
            check_price(price, &mut errors);
        }
        if let Some(stock) = self.stock {
            check_stock(stock, &mut errors);
        }
        errors
    }
}

impl Product {
    /// Builds a product from validated fields with a fresh id and timestamps.
    pub fn create(fields: NewProduct) -> Result<Self, DomainError> {
        let errors = fields.validate();
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        let (Some(name), Some(price), Some(stock)) = (fields.name, fields.price, fields.stock)
        else {
            return Err(DomainError::Internal(
                "validated product is missing a field".to_string(),
            ));
        };
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description: non_empty(fields.description),
            price,
            stock,
            category: non_empty(fields.category),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: ProductUpdate) -> Result<(), DomainError> {
        let errors = update.validate();
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if update.description.is_some() {
            self.description = non_empty(update.description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if update.category.is_some() {
            self.category = non_empty(update.category);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Applies a signed stock delta. The product is untouched when the
    /// result would be negative or out of range.
    pub fn adjust_stock(&mut self, delta: i64) -> Result<(), DomainError> {
        match self.stock.checked_add(delta) {
            Some(next) if next >= 0 => {
                self.stock = next;
                self.updated_at = Utc::now();
                Ok(())
            }
            None if delta > 0 => Err(DomainError::StockOverflow(self.name.clone())),
            _ => Err(DomainError::InsufficientStock(self.name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn fields(name: &str, price: &str, stock: i64) -> NewProduct {
        NewProduct {
            name: Some(name.to_string()),
            description: Some("Description".to_string()),
            price: Some(dec(price)),
            stock: Some(stock),
            category: Some("Electronics".to_string()),
        }
    }

    #[test]
    fn create_keeps_every_field() {
        let product = Product::create(fields("Test Product", "99.99", 10)).unwrap();
        assert_eq!(product.name, "Test Product");
        assert_eq!(product.description.as_deref(), Some("Description"));
        assert_eq!(product.price, dec("99.99"));
        assert_eq!(product.stock, 10);
        assert_eq!(product.category.as_deref(), Some("Electronics"));
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn identical_fields_get_distinct_ids() {
        let a = Product::create(fields("Same", "10", 5)).unwrap();
        let b = Product::create(fields("Same", "10", 5)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = fields("   ", "50", 100).validate();
        assert_eq!(errors, vec![NAME_REQUIRED.to_string()]);
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert_eq!(fields("P", "-10", 100).validate(), vec![PRICE_POSITIVE]);
        assert_eq!(fields("P", "0", 100).validate(), vec![PRICE_POSITIVE]);
    }

    #[test]
    fn negative_stock_is_rejected() {
        assert_eq!(fields("P", "50", -5).validate(), vec![STOCK_NON_NEGATIVE]);
    }

    #[test]
    fn missing_fields_report_all_violations() {
        let errors = NewProduct::default().validate();
        assert_eq!(
            errors,
            vec![NAME_REQUIRED, PRICE_POSITIVE, STOCK_NON_NEGATIVE]
        );
    }

    #[test]
    fn create_fails_with_every_violation() {
        let err = Product::create(fields("", "0", -1)).unwrap_err();
        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn adjust_stock_adds_and_subtracts() {
        let mut product = Product::create(fields("P", "50", 10)).unwrap();
        product.adjust_stock(5).unwrap();
        assert_eq!(product.stock, 15);
        product.adjust_stock(-3).unwrap();
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn adjust_stock_below_zero_leaves_product_untouched() {
        let mut product = Product::create(fields("P", "50", 5)).unwrap();
        let before = product.clone();
        let err = product.adjust_stock(-10).unwrap_err();
        assert_eq!(err, DomainError::InsufficientStock("P".to_string()));
        assert_eq!(product, before);
    }

    #[test]
    fn adjust_stock_overflow_is_not_reported_as_shortage() {
        let mut product = Product::create(fields("P", "50", i64::MAX - 1)).unwrap();
        let before = product.clone();
        let err = product.adjust_stock(2).unwrap_err();
        assert_eq!(err, DomainError::StockOverflow("P".to_string()));
        assert_eq!(product, before);
    }

    #[test]
    fn adjust_stock_refreshes_updated_at() {
        let mut product = Product::create(fields("P", "50", 10)).unwrap();
        let stamp = product.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        product.adjust_stock(1).unwrap();
        assert!(product.updated_at > stamp);
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut product = Product::create(fields("P", "50", 10)).unwrap();
        product
            .apply(ProductUpdate {
                price: Some(dec("45.50")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.price, dec("45.50"));
        assert_eq!(product.name, "P");
        assert_eq!(product.stock, 10);
        assert_eq!(product.description.as_deref(), Some("Description"));
    }

    #[test]
    fn apply_can_clear_description() {
        let mut product = Product::create(fields("P", "50", 10)).unwrap();
        product
            .apply(ProductUpdate {
                description: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(product.description.is_none());
    }

    #[test]
    fn apply_rejects_zero_price_and_keeps_state() {
        let mut product = Product::create(fields("P", "50", 10)).unwrap();
        let before = product.clone();
        let err = product
            .apply(ProductUpdate {
                price: Some(dec("0")),
                stock: Some(-1),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(vec![
                PRICE_POSITIVE.to_string(),
                STOCK_NON_NEGATIVE.to_string()
            ])
        );
        assert_eq!(product, before);
    }

    #[test]
    fn filter_uses_exact_category_and_inclusive_bounds() {
        let product = Product::create(fields("P", "50", 10)).unwrap();
        let by_category = |c: &str| ProductFilter {
            category: Some(c.to_string()),
            ..Default::default()
        };
        assert!(by_category("Electronics").matches(&product));
        assert!(!by_category("electronics").matches(&product));

        let bounds = ProductFilter {
            min_price: Some(dec("50")),
            max_price: Some(dec("50")),
            ..Default::default()
        };
        assert!(bounds.matches(&product));

        let above = ProductFilter {
            min_price: Some(dec("50.01")),
            ..Default::default()
        };
        assert!(!above.matches(&product));
    }
}
