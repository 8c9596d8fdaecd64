//! User domain entity and related types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{ROLE_ADMIN, ROLE_LOGISTICS_EMPLOYEE, ROLE_MANAGER, ROLE_SALES_EMPLOYEE};
use crate::error::DomainError;
use crate::password::Password;
use crate::validation::{
    CITY_RE, COUNTRY_RE, EMAIL_RE, HOUSE_NUMBER_RE, PERSON_NAME_RE, PHONE_RE, STREET_RE,
    ZIP_CODE_RE,
};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Sales Employee")]
    SalesEmployee,
    #[serde(rename = "Logistics Employee")]
    LogisticsEmployee,
    #[serde(rename = "Admin")]
    Admin,
}

impl Role {
    /// Check if this role may run administrative operations
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => ROLE_MANAGER,
            Role::SalesEmployee => ROLE_SALES_EMPLOYEE,
            Role::LogisticsEmployee => ROLE_LOGISTICS_EMPLOYEE,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Case-insensitive; accepts the stored spelling or a hyphenated one
    /// (`sales-employee`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ").to_lowercase();
        [
            Role::Manager,
            Role::SalesEmployee,
            Role::LogisticsEmployee,
            Role::Admin,
        ]
        .into_iter()
        .find(|role| role.as_str().to_lowercase() == normalized)
        .ok_or_else(|| DomainError::validation("role", format!("Unknown role '{}'", s)))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address, stored nested inside the user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(regex(
        path = *STREET_RE,
        message = "Street name should only contain letters, numbers, and spaces."
    ))]
    pub street: String,
    #[validate(regex(
        path = *HOUSE_NUMBER_RE,
        message = "House number can contain numbers and letters."
    ))]
    pub house_number: String,
    #[validate(regex(path = *CITY_RE, message = "City name should only contain letters and spaces."))]
    pub city: String,
    #[validate(regex(path = *ZIP_CODE_RE, message = "ZIP code must contain 5-8 digits."))]
    pub zip_code: String,
    #[validate(regex(
        path = *COUNTRY_RE,
        message = "Country name should only contain letters and spaces."
    ))]
    pub country: String,
}

/// User domain entity, as persisted in the user store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC hash, never plaintext
    pub password: String,
    pub phone_number: String,
    /// DD/MM/YYYY
    pub birthday: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl User {
    /// Case-insensitive email comparison, the store's key semantics
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// Check if user holds the Manager role
    pub fn is_manager(&self) -> bool {
        self.role.is_some_and(|role| role.is_manager())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the plaintext against the stored hash
    pub fn verify_password(&self, plain_text: &str) -> bool {
        crate::password::verify(plain_text, &self.password)
    }

    /// Shallow merge: every field present in `changes` replaces the stored
    /// one. A new address replaces the old address as a whole.
    pub fn apply(&mut self, changes: UserUpdate) {
        let UserUpdate {
            first_name,
            last_name,
            phone_number,
            birthday,
            address,
            role,
            hiring_date,
            salary,
        } = changes;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = phone_number {
            self.phone_number = v;
        }
        if let Some(v) = birthday {
            self.birthday = v;
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = role {
            self.role = Some(v);
        }
        if let Some(v) = hiring_date {
            self.hiring_date = Some(v);
        }
        if let Some(v) = salary {
            self.salary = Some(v);
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Email: {}", self.full_name(), self.email)?;
        if let Some(role) = self.role {
            write!(f, ", Role: {}", role)?;
        }
        write!(f, ", Birthday: {}", self.birthday)?;
        if let Some(hiring_date) = &self.hiring_date {
            write!(f, ", Hiring Date: {}", hiring_date)?;
        }
        if let Some(salary) = self.salary {
            write!(f, ", Salary: {:.2}", salary)?;
        }
        f.write_str(")")
    }
}

/// Registration input. Carries the plaintext password until it is hashed.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewUser {
    #[validate(regex(
        path = *PERSON_NAME_RE,
        message = "First name should only contain letters and spaces."
    ))]
    pub first_name: String,
    #[validate(regex(
        path = *PERSON_NAME_RE,
        message = "Last name should only contain letters and spaces."
    ))]
    pub last_name: String,
    #[validate(regex(path = *EMAIL_RE, message = "Email must follow the format: example@domain.com."))]
    pub email: String,
    pub password: String,
    #[validate(regex(
        path = *PHONE_RE,
        message = "Phone number must be in a valid format, such as +1234567890."
    ))]
    pub phone_number: String,
    pub birthday: String,
    #[validate(nested)]
    pub address: Address,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub hiring_date: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Salary must not be negative."))]
    pub salary: Option<f64>,
}

impl NewUser {
    /// Build the stored record, swapping the plaintext for its hash
    pub fn into_user(self, password: Password) -> User {
        User {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: password.into_string(),
            phone_number: self.phone_number,
            birthday: self.birthday,
            address: self.address,
            role: self.role,
            hiring_date: self.hiring_date,
            salary: self.salary,
        }
    }
}

/// Partial update. Email is the key and the password has its own flow, so
/// neither appears here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(regex(
        path = *PERSON_NAME_RE,
        message = "First name should only contain letters and spaces."
    ))]
    pub first_name: Option<String>,
    #[validate(regex(
        path = *PERSON_NAME_RE,
        message = "Last name should only contain letters and spaces."
    ))]
    pub last_name: Option<String>,
    #[validate(regex(
        path = *PHONE_RE,
        message = "Phone number must be in a valid format, such as +1234567890."
    ))]
    pub phone_number: Option<String>,
    pub birthday: Option<String>,
    #[validate(nested)]
    pub address: Option<Address>,
    pub role: Option<Role>,
    pub hiring_date: Option<String>,
    #[validate(range(min = 0.0, message = "Salary must not be negative."))]
    pub salary: Option<f64>,
}

impl UserUpdate {
    /// Update that only changes the role
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Update that only changes the salary
    pub fn salary(salary: f64) -> Self {
        Self {
            salary: Some(salary),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Equality filter for user search; unset fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl UserQuery {
    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |role| user.role == Some(role))
            && self
                .last_name
                .as_ref()
                .map_or(true, |v| &user.last_name == v)
            && self.city.as_ref().map_or(true, |v| &user.address.city == v)
            && self
                .country
                .as_ref()
                .map_or(true, |v| &user.address.country == v)
    }
}

/// Key form of an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: "Ana.Gomez@Example.com".to_string(),
            password: "hash".to_string(),
            phone_number: "+1234567890".to_string(),
            birthday: "25/03/1992".to_string(),
            address: Address {
                street: "Main St".to_string(),
                house_number: "5A".to_string(),
                city: "Berlin".to_string(),
                zip_code: "10115".to_string(),
                country: "Germany".to_string(),
            },
            role: Some(Role::LogisticsEmployee),
            hiring_date: None,
            salary: None,
        }
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::SalesEmployee).unwrap();
        assert_eq!(json, "\"Sales Employee\"");
        let role: Role = serde_json::from_str("\"Logistics Employee\"").unwrap();
        assert_eq!(role, Role::LogisticsEmployee);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("sales-employee".parse::<Role>().unwrap(), Role::SalesEmployee);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_has_email_ignores_case() {
        let user = sample_user();
        assert!(user.has_email("ana.gomez@example.com"));
        assert!(user.has_email(" ANA.GOMEZ@EXAMPLE.COM "));
        assert!(!user.has_email("ana@example.com"));
    }

    #[test]
    fn test_apply_is_shallow() {
        let mut user = sample_user();
        let new_address = Address {
            street: "Side St".to_string(),
            house_number: "1".to_string(),
            city: "Hamburg".to_string(),
            zip_code: "20095".to_string(),
            country: "Germany".to_string(),
        };
        user.apply(UserUpdate {
            salary: Some(5000.0),
            address: Some(new_address.clone()),
            ..UserUpdate::default()
        });

        assert_eq!(user.salary, Some(5000.0));
        assert_eq!(user.address, new_address);
        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.role, Some(Role::LogisticsEmployee));
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let mut user = sample_user();
        user.role = None;
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("role").is_none());
        assert!(json.get("salary").is_none());

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_query_matches() {
        let user = sample_user();
        assert!(UserQuery::default().matches(&user));
        assert!(UserQuery {
            city: Some("Berlin".to_string()),
            role: Some(Role::LogisticsEmployee),
            ..UserQuery::default()
        }
        .matches(&user));
        assert!(!UserQuery {
            role: Some(Role::Manager),
            ..UserQuery::default()
        }
        .matches(&user));
    }
}
