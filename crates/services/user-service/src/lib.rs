//! User Service Library
//!
//! Employee records: registration, login, and the manager-only
//! administration operations, persisted through a [`UserRepository`].
//! Embedded by the `stockroom` binary.

pub mod repository;
pub mod service;

pub use repository::{JsonUserStore, UserRepository};
pub use service::{Authenticator, Employee, Manager, Registration};
