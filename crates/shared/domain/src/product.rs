//! Product domain entity and catalog categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_DISCOUNT_PERCENT;
use crate::error::{DomainError, DomainResult, FieldErrors};
use crate::validation::{collect_field_errors, PRODUCT_ID_RE, PRODUCT_NAME_RE};

/// Catalog categories. Lowercase spellings are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "electronics")]
    Electronics,
    #[serde(alias = "furniture")]
    Furniture,
    #[serde(alias = "clothes")]
    Clothes,
    #[serde(alias = "footwear")]
    Footwear,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Furniture,
        Category::Clothes,
        Category::Footwear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothes => "Clothes",
            Category::Footwear => "Footwear",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(
                    "category",
                    format!(
                        "Category '{}' not in list (Electronics, Furniture, Clothes, Footwear)",
                        s
                    ),
                )
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product record. The product id is the catalog key and lives outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(regex(
        path = *PRODUCT_NAME_RE,
        message = "product_name does not follow required pattern"
    ))]
    pub product_name: String,
    #[validate(range(min = 0.0, message = "Quantity must not be negative."))]
    pub quantity: f64,
    #[validate(range(min = 0.0, message = "Price must not be negative."))]
    pub price: f64,
    pub category: Category,
}

impl Product {
    pub fn new(
        product_name: impl Into<String>,
        quantity: f64,
        price: f64,
        category: Category,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            price,
            category,
        }
    }

    /// Check name pattern and that price and quantity are finite and
    /// non-negative. Reports every failing field.
    pub fn check(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            collect_field_errors(&e, "", &mut errors);
        }
        if !self.quantity.is_finite() && !errors.contains("quantity") {
            errors.push("quantity", "Quantity must be a number.");
        }
        if !self.price.is_finite() && !errors.contains("price") {
            errors.push("price", "Price must be a number.");
        }
        errors.into_result()
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0.0
    }

    /// Stock value of this line: price times quantity
    pub fn value(&self) -> f64 {
        self.price * self.quantity
    }

    /// Price after taking `percent` off, floored at zero.
    pub fn discounted_price(&self, percent: f64) -> DomainResult<f64> {
        if !(0.0..=MAX_DISCOUNT_PERCENT).contains(&percent) {
            return Err(DomainError::validation(
                "discount",
                "Discount percentage must be between 0 and 100",
            ));
        }
        let discount = self.price * (percent / 100.0);
        Ok((self.price - discount).max(0.0))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Quantity: {}, Price: ${:.2}, Category: {}",
            self.product_name, self.quantity, self.price, self.category
        )
    }
}

/// Check a catalog key against `[A-Z]` followed by three digits
pub fn validate_product_id(product_id: &str) -> DomainResult<()> {
    if PRODUCT_ID_RE.is_match(product_id) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "product_id",
            "Product ID must be a capital letter followed by three digits (e.g. A123).",
        ))
    }
}
