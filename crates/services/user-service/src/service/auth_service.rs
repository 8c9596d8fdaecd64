//! Authentication service - login, lockout, and password recovery.

use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{password, User, DEFAULT_MAX_LOGIN_ATTEMPTS};

use crate::repository::UserRepository;
use crate::service::{Employee, Manager};

/// Verified against when the email is unknown, so a miss costs as much as a
/// wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Checks credentials and counts consecutive failures for one session.
#[derive(Debug, Clone)]
pub struct Authenticator {
    max_attempts: u32,
    failed_attempts: u32,
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOGIN_ATTEMPTS)
    }
}

impl Authenticator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            failed_attempts: 0,
        }
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failed_attempts)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown email or wrong password;
    /// `TooManyAttempts` once the failure budget is spent (no further
    /// checks are made).
    pub fn login<R>(&mut self, repo: &R, email: &str, plain_password: &str) -> AppResult<User>
    where
        R: UserRepository + ?Sized,
    {
        if self.remaining_attempts() == 0 {
            warn!(email = %email, "Login refused, attempt budget exhausted");
            return Err(AppError::TooManyAttempts);
        }

        let user = repo.find(email);
        let stored_hash = user.as_ref().map_or(DUMMY_HASH, |u| u.password.as_str());
        let verified = password::verify(plain_password, stored_hash);

        match user {
            Some(user) if verified => {
                self.failed_attempts = 0;
                info!(email = %user.email, "Login successful");
                Ok(user)
            }
            _ => {
                self.failed_attempts += 1;
                warn!(
                    email = %email,
                    remaining = self.remaining_attempts(),
                    "Invalid email or password"
                );
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Log in and require the Manager role.
    ///
    /// # Errors
    /// As [`Authenticator::login`], plus `Forbidden` for a non-manager.
    pub fn login_manager<R>(
        &mut self,
        repo: &R,
        email: &str,
        plain_password: &str,
    ) -> AppResult<Manager>
    where
        R: UserRepository + ?Sized,
    {
        let user = self.login(repo, email, plain_password)?;
        if !user.is_manager() {
            warn!(email = %user.email, "Access denied, only Managers can log in here");
            return Err(AppError::forbidden("Only Managers can log in here"));
        }
        Ok(Manager::new(Employee::from_record(user)))
    }

    /// Report whether a password reset would be sent to `email`.
    ///
    /// Delivery is out of scope; the outcome is only logged.
    pub fn forgot_password<R>(&self, repo: &R, email: &str) -> bool
    where
        R: UserRepository + ?Sized,
    {
        match repo.find(email) {
            Some(user) => {
                info!(email = %user.email, "Password reset requested");
                true
            }
            None => {
                info!(email = %email, "Password reset requested for unknown email");
                false
            }
        }
    }
}
