//! User repository backed by a single JSON file.

use std::path::PathBuf;

use tracing::{debug, info};

use common::{AppError, AppResult, JsonFile, OptionExt};
use domain::{User, UserQuery, UserUpdate};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Records are keyed by email, compared case-insensitively.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UserRepository {
    /// Insert a new record; fails if the email is already taken
    fn add(&mut self, user: User) -> AppResult<()>;

    /// Look a record up by email; a miss is `None`
    fn find(&self, email: &str) -> Option<User>;

    /// Merge `changes` into an existing record and return the result
    fn update(&mut self, email: &str, changes: UserUpdate) -> AppResult<User>;

    /// Remove a record by email
    fn delete(&mut self, email: &str) -> AppResult<()>;

    /// All records in insertion order
    fn list(&self) -> Vec<User>;

    /// Records matching every set field of `query`
    fn search(&self, query: &UserQuery) -> AppResult<Vec<User>>;
}

/// JSON-file implementation of [`UserRepository`].
///
/// The in-memory list is the source of truth; each mutation rewrites the
/// whole file.
#[derive(Debug)]
pub struct JsonUserStore {
    file: JsonFile,
    users: Vec<User>,
}

impl JsonUserStore {
    /// Open the store at `path`. A missing or corrupt file gives an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let users: Vec<User> = file.load_or_default();
        debug!(path = %file.path().display(), count = users.len(), "Loaded user store");
        Self { file, users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, email: &str) -> Option<usize> {
        self.users.iter().position(|u| u.has_email(email))
    }

    /// Write `users` to disk and adopt it only once the write succeeded, so a
    /// failed save leaves the store as it was.
    fn commit(&mut self, users: Vec<User>) -> AppResult<()> {
        self.file.save(&users)?;
        self.users = users;
        Ok(())
    }
}

impl UserRepository for JsonUserStore {
    fn add(&mut self, user: User) -> AppResult<()> {
        if self.position(&user.email).is_some() {
            return Err(AppError::already_exists(format!(
                "User with email {}",
                user.email
            )));
        }

        info!(email = %user.email, "Adding user");
        let mut users = self.users.clone();
        users.push(user);
        self.commit(users)
    }

    fn find(&self, email: &str) -> Option<User> {
        self.position(email).map(|i| self.users[i].clone())
    }

    fn update(&mut self, email: &str, changes: UserUpdate) -> AppResult<User> {
        let index = self
            .position(email)
            .ok_or_not_found(format!("User with email {}", email))?;

        info!(email = %email, "Updating user");
        let mut users = self.users.clone();
        users[index].apply(changes);
        let updated = users[index].clone();
        self.commit(users)?;
        Ok(updated)
    }

    fn delete(&mut self, email: &str) -> AppResult<()> {
        let index = self
            .position(email)
            .ok_or_not_found(format!("User with email {}", email))?;

        info!(email = %email, "Deleting user");
        let mut users = self.users.clone();
        users.remove(index);
        self.commit(users)
    }

    fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    fn search(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let found: Vec<User> = self
            .users
            .iter()
            .filter(|u| query.matches(u))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(AppError::not_found("Users matching the given criteria"));
        }
        Ok(found)
    }
}
