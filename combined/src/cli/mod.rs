//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `register`, `login`, `forgot-password` - self-service account flows
//! - `employee` - manager-only administration of employee records
//! - `product` - catalog maintenance, queries and stock operations

pub mod args;

pub use args::{Cli, Commands};
