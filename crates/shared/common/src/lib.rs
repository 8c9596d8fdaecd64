//! Common utilities shared across the service crates.
//!
//! This crate provides:
//! - Unified error handling on top of the domain errors
//! - Configuration structures
//! - Whole-file JSON persistence

pub mod config;
pub mod error;
pub mod storage;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use storage::JsonFile;
