//! Application services - registration, login, and the employee roles.
//!
//! Services hold no storage of their own; each operation takes the
//! repository it works on.

mod auth_service;
mod employee;
mod manager;
mod registration;

pub use auth_service::Authenticator;
pub use employee::Employee;
pub use manager::Manager;
pub use registration::Registration;
