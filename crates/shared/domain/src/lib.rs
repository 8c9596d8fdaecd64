//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no storage dependencies:
//! user and product records, the validator, and password hashing.
//! Both service crates build on these types.

pub mod constants;
pub mod error;
pub mod password;
pub mod product;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, FieldError, FieldErrors};
pub use password::Password;
pub use product::{validate_product_id, Category, Product};
pub use user::{normalize_email, Address, NewUser, Role, User, UserQuery, UserUpdate};
pub use validation::{age_on, UserValidator};
