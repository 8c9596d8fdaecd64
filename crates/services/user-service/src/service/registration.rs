//! Registration - validate, hash, persist.

use tracing::info;

use common::{AppError, AppResult};
use domain::{NewUser, Password, User, UserValidator};

use crate::repository::UserRepository;

/// Turns registration input into a stored user record.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    validator: UserValidator,
}

impl Registration {
    pub fn new(validator: UserValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &UserValidator {
        &self.validator
    }

    /// Register a new user.
    ///
    /// The plaintext password is replaced by its hash before anything is
    /// written.
    ///
    /// # Errors
    /// `Validation` listing every bad field, `AlreadyExists` if the email is
    /// taken, or a storage error.
    pub fn register<R>(&self, repo: &mut R, record: NewUser) -> AppResult<User>
    where
        R: UserRepository + ?Sized,
    {
        let record = self.validator.validate(record)?;

        // Checked up front so a duplicate doesn't pay for a hash
        if repo.find(&record.email).is_some() {
            return Err(AppError::already_exists(format!(
                "User with email {}",
                record.email
            )));
        }

        let password = Password::hash(&record.password)?;
        let user = record.into_user(password);
        repo.add(user.clone())?;

        info!(email = %user.email, "User registered");
        Ok(user)
    }
}
