//! Inventory service - stock adjustments and reporting over a catalog.

use std::fmt;

use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Product, DEFAULT_LOW_STOCK_THRESHOLD};

use crate::repository::{ProductEntry, ProductRepository};

/// Snapshot of catalog health.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    pub product_count: usize,
    pub total_value: f64,
    pub threshold: f64,
    /// Entries below the threshold, zero-quantity ones included
    pub low_stock: Vec<ProductEntry>,
}

impl StockReport {
    pub fn out_of_stock(&self) -> impl Iterator<Item = &ProductEntry> {
        self.low_stock.iter().filter(|(_, p)| !p.is_in_stock())
    }
}

impl fmt::Display for StockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Products: {}", self.product_count)?;
        writeln!(f, "Total value: ${:.2}", self.total_value)?;
        if self.low_stock.is_empty() {
            return write!(f, "No products below {} units", self.threshold);
        }
        write!(f, "Below {} units:", self.threshold)?;
        for (id, product) in &self.low_stock {
            write!(f, "\n  {}: {}", id, product)?;
        }
        Ok(())
    }
}

/// Stock operations on top of a [`ProductRepository`].
pub struct InventoryManager<R: ProductRepository> {
    repo: R,
    low_stock_threshold: f64,
}

impl<R: ProductRepository> InventoryManager<R> {
    pub fn new(repo: R) -> Self {
        Self::with_threshold(repo, DEFAULT_LOW_STOCK_THRESHOLD)
    }

    pub fn with_threshold(repo: R, low_stock_threshold: f64) -> Self {
        Self {
            repo,
            low_stock_threshold,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn low_stock_threshold(&self) -> f64 {
        self.low_stock_threshold
    }

    fn fetch(&self, product_id: &str) -> AppResult<Product> {
        self.repo
            .get(product_id)
            .ok_or_not_found(format!("Product {}", product_id))
    }

    /// Add `added_quantity` units to a product and return the new record.
    ///
    /// # Errors
    /// `Validation` for a negative or non-finite amount, `NotFound` for an
    /// unknown id.
    pub fn restock(&mut self, product_id: &str, added_quantity: f64) -> AppResult<Product> {
        if !added_quantity.is_finite() || added_quantity < 0.0 {
            return Err(AppError::validation(
                "quantity",
                "Restock amount must be a non-negative number.",
            ));
        }

        let mut product = self.fetch(product_id)?;
        product.quantity += added_quantity;
        self.repo.update(product_id, product.clone())?;

        info!(product_id, added = added_quantity, quantity = product.quantity, "Product restocked");
        Ok(product)
    }

    /// Replace a product's price; the store re-validates it.
    pub fn set_price(&mut self, product_id: &str, price: f64) -> AppResult<Product> {
        let mut product = self.fetch(product_id)?;
        product.price = price;
        self.repo.update(product_id, product.clone())?;

        info!(product_id, price, "Price updated");
        Ok(product)
    }

    /// Take `percent` off a product's price, never going below zero.
    ///
    /// # Errors
    /// `Validation` on field `discount` when `percent` is outside 0..=100.
    pub fn apply_discount(&mut self, product_id: &str, percent: f64) -> AppResult<Product> {
        let mut product = self.fetch(product_id)?;
        product.price = product.discounted_price(percent)?;
        self.repo.update(product_id, product.clone())?;

        info!(product_id, percent, price = product.price, "Discount applied");
        Ok(product)
    }

    /// Summarize the catalog against `threshold` (or the configured one).
    pub fn stock_report(&self, threshold: Option<f64>) -> StockReport {
        let threshold = threshold.unwrap_or(self.low_stock_threshold);
        StockReport {
            product_count: self.repo.list().len(),
            total_value: self.repo.total_value(),
            threshold,
            low_stock: self
                .repo
                .filter_by_low_quantity(threshold)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use domain::Category;
    use mockall::predicate::eq;

    fn shoes() -> Product {
        Product::new("Running Shoes", 4.0, 80.0, Category::Footwear)
    }

    fn repo_with_shoes() -> MockProductRepository {
        let mut repo = MockProductRepository::new();
        repo.expect_get()
            .returning(|id| (id == "F100").then(shoes));
        repo
    }

    #[test]
    fn test_restock() {
        let mut repo = repo_with_shoes();
        let mut expected = shoes();
        expected.quantity = 10.0;
        repo.expect_update()
            .with(eq("F100"), eq(expected))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut inventory = InventoryManager::new(repo);
        assert_eq!(inventory.restock("F100", 6.0).unwrap().quantity, 10.0);
    }

    #[test]
    fn test_restock_rejects_negative_amount() {
        let mut repo = MockProductRepository::new();
        repo.expect_get().never();
        repo.expect_update().never();

        let mut inventory = InventoryManager::new(repo);
        let err = inventory.restock("F100", -2.0).unwrap_err();
        assert_eq!(err.field_errors().unwrap().fields(), vec!["quantity"]);
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let mut repo = repo_with_shoes();
        repo.expect_update().never();

        let mut inventory = InventoryManager::new(repo);
        assert!(matches!(
            inventory.set_price("X999", 10.0),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_discount() {
        let mut repo = repo_with_shoes();
        repo.expect_update()
            .withf(|id, p| id == "F100" && p.price == 60.0)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut inventory = InventoryManager::new(repo);
        assert_eq!(inventory.apply_discount("F100", 25.0).unwrap().price, 60.0);
    }

    #[test]
    fn test_discount_out_of_range() {
        let mut repo = repo_with_shoes();
        repo.expect_update().never();

        let mut inventory = InventoryManager::new(repo);
        for percent in [-5.0, 100.5] {
            let err = inventory.apply_discount("F100", percent).unwrap_err();
            assert_eq!(err.field_errors().unwrap().fields(), vec!["discount"]);
        }
    }

    #[test]
    fn test_full_discount_is_free() {
        let mut repo = repo_with_shoes();
        repo.expect_update().returning(|_, _| Ok(()));

        let mut inventory = InventoryManager::new(repo);
        assert_eq!(inventory.apply_discount("F100", 100.0).unwrap().price, 0.0);
    }

    #[test]
    fn test_stock_report() {
        let mut repo = MockProductRepository::new();
        let sold_out = Product::new("Scarf", 0.0, 12.0, Category::Clothes);
        repo.expect_list().returning(move || {
            vec![
                ("F100".to_string(), shoes()),
                ("C200".to_string(), sold_out.clone()),
            ]
        });
        repo.expect_total_value().returning(|| 320.0);
        repo.expect_filter_by_low_quantity()
            .with(eq(5.0))
            .returning(|_| {
                Some(vec![
                    ("F100".to_string(), shoes()),
                    (
                        "C200".to_string(),
                        Product::new("Scarf", 0.0, 12.0, Category::Clothes),
                    ),
                ])
            });

        let inventory = InventoryManager::new(repo);
        let report = inventory.stock_report(None);
        assert_eq!(report.product_count, 2);
        assert_eq!(report.total_value, 320.0);
        assert_eq!(report.low_stock.len(), 2);

        let out: Vec<&str> = report.out_of_stock().map(|(id, _)| id.as_str()).collect();
        assert_eq!(out, vec!["C200"]);
        assert!(report.to_string().contains("Total value: $320.00"));
    }

    #[test]
    fn test_stock_report_with_nothing_low() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().returning(Vec::new);
        repo.expect_total_value().returning(|| 0.0);
        repo.expect_filter_by_low_quantity().returning(|_| None);

        let report = InventoryManager::with_threshold(repo, 2.0).stock_report(None);
        assert!(report.low_stock.is_empty());
        assert!(report.to_string().ends_with("No products below 2 units"));
    }
}
