//! Self-service account commands: register, login, forgot-password.

use common::{AppConfig, AppResult};
use user_service_lib::{Authenticator, JsonUserStore, Registration};

use crate::cli::args::{CredentialArgs, NewUserArgs};

/// Execute the register command
pub fn register(args: NewUserArgs, config: &AppConfig) -> AppResult<()> {
    let mut store = JsonUserStore::open(&config.storage.users_path);
    let user = Registration::default().register(&mut store, args.into())?;
    println!("User {} registered successfully.", user.email);
    Ok(())
}

/// Execute the login command
pub fn login(args: CredentialArgs, config: &AppConfig) -> AppResult<()> {
    let store = JsonUserStore::open(&config.storage.users_path);
    let mut auth = Authenticator::new(config.auth.max_login_attempts);
    let user = auth.login(&store, &args.email, &args.password)?;
    println!("Login successful. Welcome, {}!", user.full_name());
    Ok(())
}

/// Execute the forgot-password command
pub fn forgot_password(email: &str, config: &AppConfig) -> AppResult<()> {
    let store = JsonUserStore::open(&config.storage.users_path);
    if Authenticator::default().forgot_password(&store, email) {
        println!("A password reset link has been sent to {}.", email);
    } else {
        println!("No account found for {}.", email);
    }
    Ok(())
}
