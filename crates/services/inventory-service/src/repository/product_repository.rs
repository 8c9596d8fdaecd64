//! Product repository backed by a single JSON object keyed by product id.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use common::{AppError, AppResult, JsonFile, OptionExt};
use domain::{validate_product_id, Category, Product};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A catalog key with its product
pub type ProductEntry = (String, Product);

/// Product repository trait for dependency injection.
///
/// Listing and filters return entries in key order: the order of the file,
/// then insertion order for new ids.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ProductRepository {
    /// Insert under a fresh id
    fn add(&mut self, product_id: &str, product: Product) -> AppResult<()>;

    /// Replace the product stored under an existing id
    fn update(&mut self, product_id: &str, product: Product) -> AppResult<()>;

    /// Remove by id; `false` if there was nothing to remove
    fn remove(&mut self, product_id: &str) -> AppResult<bool>;

    fn get(&self, product_id: &str) -> Option<Product>;

    /// First product whose name matches, ignoring case
    fn find_by_name(&self, name: &str) -> Option<ProductEntry>;

    fn list(&self) -> Vec<ProductEntry>;

    /// Sum of price times quantity over the catalog
    fn total_value(&self) -> f64;

    /// Products strictly cheaper than `threshold`
    fn filter_by_price_below(&self, threshold: f64) -> Vec<ProductEntry>;

    fn filter_by_category(&self, category: Category) -> Vec<ProductEntry>;

    /// Products with quantity strictly below `threshold`, or `None` when
    /// there are none
    fn filter_by_low_quantity(&self, threshold: f64) -> Option<Vec<ProductEntry>>;
}

/// JSON-file implementation of [`ProductRepository`].
#[derive(Debug)]
pub struct JsonProductStore {
    file: JsonFile,
    products: Vec<ProductEntry>,
}

impl JsonProductStore {
    /// Open the catalog at `path`. A missing or corrupt file gives an empty
    /// catalog; so does a file with any entry that is not a product.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let raw: Map<String, Value> = file.load_or_default();

        let products = raw
            .into_iter()
            .map(|(id, value)| serde_json::from_value(value).map(|p| (id, p)))
            .collect::<Result<Vec<ProductEntry>, _>>()
            .unwrap_or_else(|e| {
                warn!(path = %file.path().display(), error = %e, "Corrupt catalog entry, starting empty");
                Vec::new()
            });

        debug!(path = %file.path().display(), count = products.len(), "Loaded product catalog");
        Self { file, products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.products.iter().position(|(id, _)| id == product_id)
    }

    fn select(&self, keep: impl Fn(&Product) -> bool) -> Vec<ProductEntry> {
        self.products
            .iter()
            .filter(|(_, p)| keep(p))
            .cloned()
            .collect()
    }

    /// Write `products` to disk and adopt them only once the write
    /// succeeded, so a failed save leaves the catalog as it was.
    fn commit(&mut self, products: Vec<ProductEntry>) -> AppResult<()> {
        let mut doc = Map::with_capacity(products.len());
        for (id, product) in &products {
            doc.insert(id.clone(), serde_json::to_value(product)?);
        }
        self.file.save(&doc)?;
        self.products = products;
        Ok(())
    }
}

impl ProductRepository for JsonProductStore {
    fn add(&mut self, product_id: &str, product: Product) -> AppResult<()> {
        validate_product_id(product_id)?;
        if self.position(product_id).is_some() {
            return Err(AppError::already_exists(format!("Product {}", product_id)));
        }
        product.check()?;

        info!(product_id, name = %product.product_name, "Adding product");
        let mut products = self.products.clone();
        products.push((product_id.to_string(), product));
        self.commit(products)
    }

    fn update(&mut self, product_id: &str, product: Product) -> AppResult<()> {
        let index = self
            .position(product_id)
            .ok_or_not_found(format!("Product {}", product_id))?;
        product.check()?;

        info!(product_id, "Updating product");
        let mut products = self.products.clone();
        products[index].1 = product;
        self.commit(products)
    }

    fn remove(&mut self, product_id: &str) -> AppResult<bool> {
        let Some(index) = self.position(product_id) else {
            info!(product_id, "Product not found, nothing to remove");
            return Ok(false);
        };

        let mut products = self.products.clone();
        products.remove(index);
        self.commit(products)?;
        info!(product_id, "Product removed");
        Ok(true)
    }

    fn get(&self, product_id: &str) -> Option<Product> {
        self.position(product_id).map(|i| self.products[i].1.clone())
    }

    fn find_by_name(&self, name: &str) -> Option<ProductEntry> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|(_, p)| p.product_name.to_lowercase() == wanted)
            .cloned()
    }

    fn list(&self) -> Vec<ProductEntry> {
        self.products.clone()
    }

    fn total_value(&self) -> f64 {
        self.products.iter().map(|(_, p)| p.value()).sum()
    }

    fn filter_by_price_below(&self, threshold: f64) -> Vec<ProductEntry> {
        self.select(|p| p.price < threshold)
    }

    fn filter_by_category(&self, category: Category) -> Vec<ProductEntry> {
        self.select(|p| p.category == category)
    }

    fn filter_by_low_quantity(&self, threshold: f64) -> Option<Vec<ProductEntry>> {
        let low = self.select(|p| p.quantity < threshold);
        if low.is_empty() {
            debug!(threshold, "No products below quantity threshold");
            return None;
        }
        Some(low)
    }
}
