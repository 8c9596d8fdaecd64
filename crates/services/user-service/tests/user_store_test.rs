//! End-to-end tests of the user store against a real file.

use chrono::NaiveDate;
use tempfile::tempdir;

use common::AppError;
use domain::{Address, NewUser, Role, UserUpdate, UserValidator};
use user_service_lib::{Authenticator, Employee, JsonUserStore, Registration, UserRepository};

fn registration() -> Registration {
    Registration::new(UserValidator::at(
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    ))
}

fn new_user(email: &str, role: Option<Role>) -> NewUser {
    NewUser {
        first_name: "Pedro".to_string(),
        last_name: "Perez".to_string(),
        email: email.to_string(),
        password: "Abcd1234".to_string(),
        phone_number: "+525551234567".to_string(),
        birthday: "01/01/1990".to_string(),
        address: Address {
            street: "Calle Ficticia".to_string(),
            house_number: "123".to_string(),
            city: "Mexico City".to_string(),
            zip_code: "01000".to_string(),
            country: "Mexico".to_string(),
        },
        role,
        hiring_date: None,
        salary: None,
    }
}

#[test]
fn test_user_lifecycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users_database.json");
    let mut store = JsonUserStore::open(&path);
    let registration = registration();

    let registered = registration
        .register(&mut store, new_user("a@x.com", None))
        .unwrap();
    assert_eq!(store.find("A@X.com"), Some(registered.clone()));
    assert_eq!(JsonUserStore::open(&path).find("a@x.com"), Some(registered));
    assert!(matches!(
        registration.register(&mut store, new_user("a@x.com", None)),
        Err(AppError::AlreadyExists(_))
    ));

    let updated = store.update("a@x.com", UserUpdate::salary(5000.0)).unwrap();
    assert_eq!(updated.salary, Some(5000.0));

    // Reopen to make sure the change hit the disk
    let mut store = JsonUserStore::open(&path);
    assert_eq!(store.find("a@x.com").unwrap().salary, Some(5000.0));

    store.delete("a@x.com").unwrap();
    assert!(store.find("a@x.com").is_none());
    assert!(JsonUserStore::open(&path).is_empty());
}

#[test]
fn test_stored_file_never_holds_plaintext() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users_database.json");
    let mut store = JsonUserStore::open(&path);

    registration()
        .register(&mut store, new_user("a@x.com", None))
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("Abcd1234"));
    assert!(raw.contains("$argon2"));
}

#[test]
fn test_manager_login_and_role_assignment() {
    let dir = tempdir().unwrap();
    let mut store = JsonUserStore::open(dir.path().join("users_database.json"));
    let registration = registration();
    registration
        .register(&mut store, new_user("boss@x.com", Some(Role::Manager)))
        .unwrap();
    registration
        .register(&mut store, new_user("clerk@x.com", None))
        .unwrap();

    let mut auth = Authenticator::default();
    let manager = auth
        .login_manager(&store, "boss@x.com", "Abcd1234")
        .unwrap();
    assert!(manager
        .assign_role(&mut store, "clerk@x.com", Role::LogisticsEmployee)
        .unwrap());
    assert_eq!(
        store.find("clerk@x.com").unwrap().role,
        Some(Role::LogisticsEmployee)
    );

    assert!(matches!(
        auth.login_manager(&store, "clerk@x.com", "Abcd1234"),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_employee_save_and_self_update() {
    let dir = tempdir().unwrap();
    let mut store = JsonUserStore::open(dir.path().join("users_database.json"));
    let user = registration()
        .register(&mut store, new_user("a@x.com", Some(Role::SalesEmployee)))
        .unwrap();

    let mut employee = Employee::new(user, "11/01/2024", 48000.0);
    assert!(matches!(
        employee.save(&mut store),
        Err(AppError::AlreadyExists(_))
    ));

    employee
        .update(&mut store, &UserValidator::new(), UserUpdate::salary(52000.0))
        .unwrap();
    assert_eq!(employee.record().salary, Some(52000.0));
}
