//! Inventory Service Library
//!
//! The product catalog: a JSON-backed [`ProductRepository`] and the
//! [`InventoryManager`] stock operations on top of it.

pub mod repository;
pub mod service;

pub use repository::{JsonProductStore, ProductEntry, ProductRepository};
pub use service::{InventoryManager, StockReport};
