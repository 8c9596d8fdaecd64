//! Stock operations over the catalog.

mod inventory_service;

pub use inventory_service::{InventoryManager, StockReport};
