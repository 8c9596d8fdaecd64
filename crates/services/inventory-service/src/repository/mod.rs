//! Repository layer for data access.

mod product_repository;

pub use product_repository::{JsonProductStore, ProductEntry, ProductRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
