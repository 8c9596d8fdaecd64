//! Manager - an employee with administrative operations over other employees.
//!
//! Every operation re-checks the acting record's role, so a `Manager` built
//! around a non-manager record can exist but cannot change anything.

use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, Role, User, UserQuery, UserUpdate, UserValidator};

use crate::repository::UserRepository;
use crate::service::{Employee, Registration};

/// Administrative wrapper around the acting employee.
#[derive(Debug, Clone, PartialEq)]
pub struct Manager {
    employee: Employee,
}

impl Manager {
    pub fn new(employee: Employee) -> Self {
        Self { employee }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// True when the acting record holds the Manager role
    pub fn is_authorized(&self) -> bool {
        self.employee.record().is_manager()
    }

    fn ensure_authorized(&self, action: &str) -> AppResult<()> {
        if self.is_authorized() {
            return Ok(());
        }
        warn!(actor = %self.employee.email(), action, "Denied, only Managers may do this");
        Err(AppError::forbidden(format!("Only Managers can {}", action)))
    }

    /// Give `target_email` a new role.
    ///
    /// Returns `Ok(false)` (and logs) when the acting user is not a manager.
    ///
    /// # Errors
    /// `NotFound` if the target does not exist.
    pub fn assign_role<R>(&self, repo: &mut R, target_email: &str, role: Role) -> AppResult<bool>
    where
        R: UserRepository + ?Sized,
    {
        if !self.is_authorized() {
            warn!(actor = %self.employee.email(), "Only Managers can assign roles");
            return Ok(false);
        }

        repo.update(target_email, UserUpdate::role(role))?;
        info!(email = %target_email, %role, "Role assigned");
        Ok(true)
    }

    /// Register a new employee on someone else's behalf.
    pub fn add_employee<R>(
        &self,
        repo: &mut R,
        registration: &Registration,
        record: NewUser,
    ) -> AppResult<User>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("add employees")?;
        let user = registration.register(repo, record)?;
        info!(email = %user.email, "Employee {} added", user.full_name());
        Ok(user)
    }

    /// Validate and merge changes into another employee's record.
    pub fn update_employee<R>(
        &self,
        repo: &mut R,
        validator: &UserValidator,
        email: &str,
        changes: UserUpdate,
    ) -> AppResult<User>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("update employees")?;
        validator.validate_update(&changes)?;
        let user = repo.update(email, changes)?;
        info!(email = %email, "Employee updated");
        Ok(user)
    }

    pub fn delete_employee<R>(&self, repo: &mut R, email: &str) -> AppResult<()>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("delete employees")?;
        repo.delete(email)?;
        info!(email = %email, "Employee deleted");
        Ok(())
    }

    pub fn find_employee<R>(&self, repo: &R, email: &str) -> AppResult<User>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("view employees")?;
        repo.find(email)
            .ok_or_not_found(format!("Employee {}", email))
    }

    pub fn list_employees<R>(&self, repo: &R) -> AppResult<Vec<User>>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("list employees")?;
        Ok(repo.list())
    }

    pub fn search_employees<R>(&self, repo: &R, query: &UserQuery) -> AppResult<Vec<User>>
    where
        R: UserRepository + ?Sized,
    {
        self.ensure_authorized("search employees")?;
        repo.search(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use domain::Address;
    use mockall::predicate::eq;

    fn record(email: &str, role: Role) -> User {
        User {
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: email.to_string(),
            password: "hash".to_string(),
            phone_number: "+525558765432".to_string(),
            birthday: "25/03/1992".to_string(),
            address: Address {
                street: "Calle Falsa".to_string(),
                house_number: "456".to_string(),
                city: "Mexico City".to_string(),
                zip_code: "01000".to_string(),
                country: "Mexico".to_string(),
            },
            role: Some(role),
            hiring_date: Some("01/01/2025".to_string()),
            salary: Some(20000.0),
        }
    }

    fn manager() -> Manager {
        Manager::new(Employee::from_record(record("boss@example.com", Role::Manager)))
    }

    fn clerk() -> Manager {
        Manager::new(Employee::from_record(record(
            "clerk@example.com",
            Role::LogisticsEmployee,
        )))
    }

    #[test]
    fn test_assign_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq("ana@example.com"), eq(UserUpdate::role(Role::SalesEmployee)))
            .times(1)
            .returning(|email, changes| {
                let mut user = record(email, Role::LogisticsEmployee);
                user.apply(changes);
                Ok(user)
            });

        let assigned = manager()
            .assign_role(&mut repo, "ana@example.com", Role::SalesEmployee)
            .unwrap();
        assert!(assigned);
    }

    #[test]
    fn test_assign_role_by_non_manager_is_refused_quietly() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let assigned = clerk()
            .assign_role(&mut repo, "ana@example.com", Role::Manager)
            .unwrap();
        assert!(!assigned);
    }

    #[test]
    fn test_assign_role_unknown_target() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .returning(|email, _| Err(AppError::not_found(email.to_string())));

        let err = manager()
            .assign_role(&mut repo, "ghost@example.com", Role::Admin)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_admin_crud_requires_manager() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().never();
        repo.expect_list().never();

        assert!(matches!(
            clerk().delete_employee(&mut repo, "ana@example.com"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            clerk().list_employees(&repo),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_delete_and_find() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq("ana@example.com"))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_find().returning(|_| None);

        let manager = manager();
        manager.delete_employee(&mut repo, "ana@example.com").unwrap();
        assert!(matches!(
            manager.find_employee(&repo, "ana@example.com"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_employee_validates_first() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let changes = UserUpdate {
            first_name: Some("R2D2".to_string()),
            ..UserUpdate::default()
        };
        let err = manager()
            .update_employee(&mut repo, &UserValidator::new(), "ana@example.com", changes)
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap().fields(), vec!["first_name"]);
    }
}
