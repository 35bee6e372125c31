//! validate — stateless record checks applied before a record reaches the store.
//!
//! The store itself accepts any well-typed record; callers (the CLI, a form) run
//! `validate_record` first. `today` is a parameter so checks are reproducible.

use chrono::{Months, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::consts::{MIN_EMPLOYEE_AGE_YEARS, PHONE_DIGITS, PHONE_PREFIX};
use crate::model::{Employee, EmployeeId, NewEmployee};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    DateOfEmployment,
    DateOfBirth,
    Phone,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::DateOfEmployment => "dateOfEmployment",
            Field::DateOfBirth => "dateOfBirth",
            Field::Phone => "phone",
            Field::Email => "email",
        }
    }
}

/// Field -> message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    fn add(&mut self, field: Field, msg: &'static str) {
        self.errors.entry(field).or_insert(msg);
    }

    fn merge(&mut self, other: ValidationErrors) {
        for (f, m) in other.errors {
            self.errors.insert(f, m);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.as_str(), msg)?;
        }
        Ok(())
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\+90 [0-9]{3} [0-9]{3} [0-9]{2} [0-9]{2}$").expect("static regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// `+90 XXX XXX XX XX`
pub fn is_valid_phone(phone: &str) -> bool {
    phone_re().is_match(phone)
}

/// Keep the first 10 digits of `input` and group them 3-3-2-2 after the prefix.
/// Partial input yields a partial grouping (`"532"` -> `"+90 532"`).
pub fn format_phone(input: &str) -> String {
    let digits: String = input
        .strip_prefix(PHONE_PREFIX)
        .unwrap_or(input)
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    let mut groups: Vec<&str> = Vec::with_capacity(4);
    let mut rest = digits.as_str();
    for width in [3usize, 3, 2, 2] {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(width.min(rest.len()));
        groups.push(head);
        rest = tail;
    }

    if groups.is_empty() {
        PHONE_PREFIX.to_string()
    } else {
        format!("{} {}", PHONE_PREFIX, groups.join(" "))
    }
}

/// Field-level checks: required names, formats, date bounds, minimum age.
pub fn validate_fields(rec: &NewEmployee, today: NaiveDate) -> ValidationErrors {
    let mut errs = ValidationErrors::default();

    if rec.first_name.trim().is_empty() {
        errs.add(Field::FirstName, "First name is required");
    }
    if rec.last_name.trim().is_empty() {
        errs.add(Field::LastName, "Last name is required");
    }

    if rec.date_of_employment > today {
        errs.add(Field::DateOfEmployment, "Date of employment cannot be in the future");
    }

    let min_age = today
        .checked_sub_months(Months::new(12 * MIN_EMPLOYEE_AGE_YEARS as u32))
        .unwrap_or(NaiveDate::MIN);
    if rec.date_of_birth > today {
        errs.add(Field::DateOfBirth, "Date of birth cannot be in the future");
    } else if rec.date_of_birth > min_age {
        errs.add(Field::DateOfBirth, "Employee must be at least 18 years old");
    }

    if rec.phone.trim().is_empty() {
        errs.add(Field::Phone, "Phone is required");
    } else if !is_valid_phone(&rec.phone) {
        errs.add(Field::Phone, "Please enter a valid phone number");
    }

    if rec.email.trim().is_empty() {
        errs.add(Field::Email, "Email is required");
    } else if !is_valid_email(&rec.email) {
        errs.add(Field::Email, "Please enter a valid email");
    }

    errs
}

/// Email (case-insensitive) and phone must not belong to another record.
/// `editing` excludes the record being edited from the comparison.
pub fn check_unique(
    rec: &NewEmployee,
    existing: &[Employee],
    editing: Option<EmployeeId>,
) -> ValidationErrors {
    let mut errs = ValidationErrors::default();
    let others = || existing.iter().filter(|e| Some(e.id) != editing);

    let email = rec.email.to_lowercase();
    if others().any(|e| e.email.to_lowercase() == email) {
        errs.add(Field::Email, "This email is already in use");
    }
    if others().any(|e| e.phone == rec.phone) {
        errs.add(Field::Phone, "This phone number is already in use");
    }
    errs
}

/// Field checks first; uniqueness only once the fields are valid.
pub fn validate_record(
    rec: &NewEmployee,
    today: NaiveDate,
    existing: &[Employee],
    editing: Option<EmployeeId>,
) -> ValidationErrors {
    let mut errs = validate_fields(rec, today);
    if errs.is_empty() {
        errs.merge(check_unique(rec, existing, editing));
    }
    errs
}
