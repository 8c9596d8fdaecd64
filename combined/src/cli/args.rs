//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use domain::{Address, Category, NewUser, Role, UserQuery, UserUpdate};

/// Stockroom - employee records and product catalog kept in JSON files
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User store file
    #[arg(long, global = true, env = "USERS_DB_PATH")]
    pub users_db: Option<PathBuf>,

    /// Product catalog file
    #[arg(long, global = true, env = "PRODUCTS_DB_PATH")]
    pub products_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new user
    Register(NewUserArgs),

    /// Check an email and password
    Login(CredentialArgs),

    /// Request a password reset
    ForgotPassword {
        email: String,
    },

    /// Manage employees (requires a Manager login)
    Employee(EmployeeArgs),

    /// Manage the product catalog
    Product(ProductArgs),
}

/// Email and password pair
#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

/// Fields of a new user record
#[derive(Args, Debug)]
pub struct NewUserArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub phone: String,
    /// DD/MM/YYYY
    #[arg(long)]
    pub birthday: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub house_number: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub zip_code: String,
    #[arg(long)]
    pub country: String,
    /// Manager, Sales Employee, Logistics Employee or Admin
    #[arg(long)]
    pub role: Option<Role>,
    /// DD/MM/YYYY
    #[arg(long)]
    pub hiring_date: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
}

impl From<NewUserArgs> for NewUser {
    fn from(args: NewUserArgs) -> Self {
        NewUser {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            password: args.password,
            phone_number: args.phone,
            birthday: args.birthday,
            address: Address {
                street: args.street,
                house_number: args.house_number,
                city: args.city,
                zip_code: args.zip_code,
                country: args.country,
            },
            role: args.role,
            hiring_date: args.hiring_date,
            salary: args.salary,
        }
    }
}

/// Arguments for the employee command
#[derive(Args, Debug)]
pub struct EmployeeArgs {
    /// Acting manager's email
    #[arg(long, global = true, env = "STOCKROOM_EMAIL")]
    pub as_email: Option<String>,

    /// Acting manager's password
    #[arg(long, global = true, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
    pub as_password: Option<String>,

    #[command(subcommand)]
    pub action: EmployeeAction,
}

/// Employee administration actions
#[derive(Subcommand, Debug)]
pub enum EmployeeAction {
    /// Add an employee record
    Add(NewUserArgs),
    /// List all employees
    List,
    /// Show one employee
    Show { email: String },
    /// Change fields of an employee record
    Update {
        email: String,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Delete an employee record
    Delete { email: String },
    /// Give an employee a new role
    AssignRole { email: String, role: Role },
    /// Find employees by role, last name or location
    Search(SearchArgs),
}

/// Optional replacement values for a user record
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub birthday: Option<String>,
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub hiring_date: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
}

impl From<UpdateArgs> for UserUpdate {
    fn from(args: UpdateArgs) -> Self {
        UserUpdate {
            first_name: args.first_name,
            last_name: args.last_name,
            phone_number: args.phone,
            birthday: args.birthday,
            address: None,
            role: args.role,
            hiring_date: args.hiring_date,
            salary: args.salary,
        }
    }
}

/// Search filters; unset ones match everything
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl From<SearchArgs> for UserQuery {
    fn from(args: SearchArgs) -> Self {
        UserQuery {
            role: args.role,
            last_name: args.last_name,
            city: args.city,
            country: args.country,
        }
    }
}

/// Arguments for the product command
#[derive(Args, Debug)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub action: ProductAction,
}

/// Catalog actions
#[derive(Subcommand, Debug)]
pub enum ProductAction {
    /// Add a product under a new id (e.g. A123)
    Add {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: Category,
    },
    /// Change fields of an existing product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Remove a product
    Remove { id: String },
    /// Show one product by id
    Show { id: String },
    /// Look a product up by name
    Find { name: String },
    /// List the whole catalog
    List,
    /// Total stock value
    Value,
    /// Filter the catalog
    Filter(FilterArgs),
    /// Add units to a product
    Restock { id: String, quantity: f64 },
    /// Set a product's price
    Price { id: String, price: f64 },
    /// Take a percentage off a product's price
    Discount { id: String, percent: f64 },
    /// Summarize stock levels
    Report {
        /// Defaults to LOW_STOCK_THRESHOLD
        #[arg(long)]
        threshold: Option<f64>,
    },
}

/// Exactly one filter must be given
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct FilterArgs {
    /// Products priced below this amount
    #[arg(long)]
    pub price_below: Option<f64>,

    #[arg(long)]
    pub category: Option<Category>,

    /// Products with fewer units than this
    #[arg(long, num_args = 0..=1, default_missing_value = "5")]
    pub low_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_product_filter() {
        let cli = Cli::try_parse_from(["stockroom", "product", "filter", "--low-quantity"]).unwrap();
        match cli.command {
            Commands::Product(ProductArgs {
                action: ProductAction::Filter(filter),
            }) => assert_eq!(filter.low_quantity, Some(5.0)),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "stockroom",
            "product",
            "filter",
            "--price-below",
            "10",
            "--category",
            "Furniture",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_role_and_category() {
        let cli = Cli::try_parse_from([
            "stockroom",
            "employee",
            "assign-role",
            "ana@example.com",
            "sales-employee",
        ])
        .unwrap();
        match cli.command {
            Commands::Employee(EmployeeArgs {
                action: EmployeeAction::AssignRole { role, .. },
                ..
            }) => assert_eq!(role, Role::SalesEmployee),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "stockroom", "product", "add", "A123", "--name", "Lamp", "--quantity", "1",
            "--price", "9.5", "--category", "toys",
        ])
        .is_err());
    }
}
