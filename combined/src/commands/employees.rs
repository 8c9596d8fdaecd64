//! Employee command - manager-only administration of user records.

use common::{AppConfig, AppError, AppResult};
use domain::{User, UserUpdate};
use user_service_lib::{Authenticator, JsonUserStore, Manager, Registration};

use crate::cli::args::{EmployeeAction, EmployeeArgs};

/// Execute the employee command
pub fn execute(args: EmployeeArgs, config: &AppConfig) -> AppResult<()> {
    let mut store = JsonUserStore::open(&config.storage.users_path);
    let manager = sign_in(&args, &store, config)?;
    tracing::debug!(actor = %manager.employee().email(), "Manager signed in");

    let registration = Registration::default();
    match args.action {
        EmployeeAction::Add(record) => {
            let user = manager.add_employee(&mut store, &registration, record.into())?;
            println!("Employee {} added.", user.email);
        }
        EmployeeAction::List => {
            let users = manager.list_employees(&store)?;
            if users.is_empty() {
                println!("No employees on record.");
            }
            print_users(&users);
        }
        EmployeeAction::Show { email } => {
            println!("{}", manager.find_employee(&store, &email)?);
        }
        EmployeeAction::Update { email, changes } => {
            let changes = UserUpdate::from(changes);
            if changes.is_empty() {
                return Err(AppError::validation("changes", "Nothing to update."));
            }
            let user =
                manager.update_employee(&mut store, registration.validator(), &email, changes)?;
            println!("Updated: {}", user);
        }
        EmployeeAction::Delete { email } => {
            manager.delete_employee(&mut store, &email)?;
            println!("Employee {} deleted.", email);
        }
        EmployeeAction::AssignRole { email, role } => {
            if manager.assign_role(&mut store, &email, role)? {
                println!("Role '{}' assigned to {}.", role, email);
            }
        }
        EmployeeAction::Search(filters) => {
            print_users(&manager.search_employees(&store, &filters.into())?);
        }
    }

    Ok(())
}

fn sign_in(args: &EmployeeArgs, store: &JsonUserStore, config: &AppConfig) -> AppResult<Manager> {
    let (Some(email), Some(password)) = (&args.as_email, &args.as_password) else {
        return Err(AppError::validation(
            "as_email",
            "Manager credentials are required (--as-email and --as-password).",
        ));
    };

    Authenticator::new(config.auth.max_login_attempts).login_manager(store, email, password)
}

fn print_users(users: &[User]) {
    for user in users {
        println!("{}", user);
    }
}
