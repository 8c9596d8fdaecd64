//! User record validation.
//!
//! Field patterns run through the `validator` derive on the record types;
//! the password policy and the birthday/age rule are checked here because
//! they need more than a single regex. All failures are gathered into one
//! [`FieldErrors`] so the caller sees every bad field at once.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::constants::{DATE_FORMAT, MINIMUM_AGE, MIN_PASSWORD_LENGTH};
use crate::error::{DomainResult, FieldErrors};
use crate::user::{NewUser, UserUpdate};

// =============================================================================
// Field patterns
// =============================================================================

pub(crate) static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+(?: [a-zA-Z]+)*$").expect("valid regex"));

pub(crate) static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\w{2,4}$").expect("valid regex"));

pub(crate) static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{1,3}[-.\s]?\d{9,12}$").expect("valid regex"));

pub(crate) static STREET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\s'-]+$").expect("valid regex"));

pub(crate) static HOUSE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,5}[a-zA-Z\d-]*$").expect("valid regex"));

pub(crate) static CITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s-]+$").expect("valid regex"));

pub(crate) static COUNTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));

pub(crate) static ZIP_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5,8}$").expect("valid regex"));

pub(crate) static PRODUCT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\d{3}$").expect("valid regex"));

pub(crate) static PRODUCT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+[_\d\s-]*[A-Za-z\d]+$").expect("valid regex"));

const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long, include at least one \
     uppercase letter, one lowercase letter, and one digit.";

// =============================================================================
// Validator
// =============================================================================

/// Validates user records against the field schema plus the age rule.
#[derive(Debug, Clone, Default)]
pub struct UserValidator {
    /// Fixed reference date; `None` means today's local date
    today: Option<NaiveDate>,
}

impl UserValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that computes ages relative to `today`
    pub fn at(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validate a registration record, returning it unchanged on success.
    ///
    /// # Errors
    /// `DomainError::Validation` naming every non-conforming field.
    pub fn validate(&self, record: NewUser) -> DomainResult<NewUser> {
        let mut errors = FieldErrors::new();
        if let Err(e) = record.validate() {
            collect_field_errors(&e, "", &mut errors);
        }
        if let Err(message) = check_password(&record.password) {
            errors.push("password", message);
        }
        if let Err(message) = check_birthday(&record.birthday, self.today()) {
            errors.push("birthday", message);
        }
        check_employment(record.hiring_date.as_deref(), record.salary, &mut errors);
        errors.into_result()?;
        Ok(record)
    }

    /// Validate only the fields present in a partial update.
    pub fn validate_update(&self, changes: &UserUpdate) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if let Err(e) = changes.validate() {
            collect_field_errors(&e, "", &mut errors);
        }
        if let Some(birthday) = &changes.birthday {
            if let Err(message) = check_birthday(birthday, self.today()) {
                errors.push("birthday", message);
            }
        }
        check_employment(changes.hiring_date.as_deref(), changes.salary, &mut errors);
        errors.into_result()
    }
}

/// Flatten `validator` output into dotted field paths.
pub(crate) fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path));
                    out.push(path.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// Upper, lower, digit, and minimum length
fn check_password(password: &str) -> Result<(), &'static str> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(PASSWORD_MESSAGE)
    }
}

/// Parse DD/MM/YYYY and require the minimum age on `today`
fn check_birthday(birthday: &str, today: NaiveDate) -> Result<(), &'static str> {
    let birth_date = NaiveDate::parse_from_str(birthday.trim(), DATE_FORMAT)
        .map_err(|_| "Invalid birthday format. Use DD/MM/YYYY.")?;
    if age_on(birth_date, today) < MINIMUM_AGE {
        return Err("User must be at least 18 years old.");
    }
    Ok(())
}

/// Hiring date must parse as DD/MM/YYYY; salary must be a finite number.
/// The derive already rejects negative salaries.
fn check_employment(hiring_date: Option<&str>, salary: Option<f64>, errors: &mut FieldErrors) {
    if let Some(date) = hiring_date {
        if NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).is_err() {
            errors.push("hiring_date", "Invalid hiring date format. Use DD/MM/YYYY.");
        }
    }
    if salary.is_some_and(|s| !s.is_finite()) && !errors.contains("salary") {
        errors.push("salary", "Salary must be a number.");
    }
}

/// Whole years between `birth_date` and `today`: year difference, minus one
/// if the birthday has not come round yet this year.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
