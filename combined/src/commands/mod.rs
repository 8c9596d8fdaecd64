//! Commands module - CLI command implementations.
//!
//! Each command opens the store it needs from the configured path, runs one
//! operation and prints the outcome on stdout.

pub mod employees;
pub mod products;
pub mod users;
