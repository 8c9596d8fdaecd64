//! Employee - a user record with employment details.

use tracing::{info, warn};

use common::AppResult;
use domain::{Role, User, UserUpdate, UserValidator};

use crate::repository::UserRepository;

/// A stored user plus hiring date and salary, with self-service persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    record: User,
}

impl Employee {
    /// Attach employment details to a user record.
    pub fn new(mut record: User, hiring_date: impl Into<String>, salary: f64) -> Self {
        record.hiring_date = Some(hiring_date.into());
        record.salary = Some(salary);
        Self { record }
    }

    /// Wrap a record as loaded from the store
    pub fn from_record(record: User) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &User {
        &self.record
    }

    pub fn into_record(self) -> User {
        self.record
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn role(&self) -> Option<Role> {
        self.record.role
    }

    /// Insert this employee into the store.
    ///
    /// # Errors
    /// `AlreadyExists` if the email is taken.
    pub fn save<R>(&self, repo: &mut R) -> AppResult<()>
    where
        R: UserRepository + ?Sized,
    {
        repo.add(self.record.clone()).inspect_err(|e| {
            warn!(email = %self.record.email, error = %e, "Error saving employee");
        })?;
        info!(email = %self.record.email, "Employee saved");
        Ok(())
    }

    /// Validate and apply a change to this employee's own record, then
    /// refresh the held copy from the store.
    ///
    /// # Errors
    /// `Validation` for bad fields, `NotFound` if the record was removed.
    pub fn update<R>(
        &mut self,
        repo: &mut R,
        validator: &UserValidator,
        changes: UserUpdate,
    ) -> AppResult<()>
    where
        R: UserRepository + ?Sized,
    {
        validator.validate_update(&changes)?;
        let updated = repo.update(&self.record.email, changes).inspect_err(|e| {
            warn!(email = %self.record.email, error = %e, "Error updating employee");
        })?;
        self.record = updated;
        Ok(())
    }
}
