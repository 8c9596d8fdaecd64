//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Role allowed to run administrative operations
pub const ROLE_MANAGER: &str = "Manager";

/// Sales staff
pub const ROLE_SALES_EMPLOYEE: &str = "Sales Employee";

/// Warehouse and shipping staff
pub const ROLE_LOGISTICS_EMPLOYEE: &str = "Logistics Employee";

/// System administrator
pub const ROLE_ADMIN: &str = "Admin";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum age (in whole years) for a registered user
pub const MINIMUM_AGE: i32 = 18;

/// Birthday and hiring date format (DD/MM/YYYY)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Upper bound for a discount percentage
pub const MAX_DISCOUNT_PERCENT: f64 = 100.0;

// =============================================================================
// Authentication
// =============================================================================

/// Consecutive failed logins allowed before the session is locked out
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;

// =============================================================================
// Inventory
// =============================================================================

/// Quantity below which a product counts as low on stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 5.0;

// =============================================================================
// Storage
// =============================================================================

/// Default backing file for the user store
pub const DEFAULT_USERS_DB_PATH: &str = "users_database.json";

/// Default backing file for the product catalog
pub const DEFAULT_PRODUCTS_DB_PATH: &str = "product_catalog.json";
