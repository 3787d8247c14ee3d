//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical record held by the store and written to disk.
//! - Map the birth date between `Option<NaiveDate>` and its `yyyy-MM-dd`
//!   string form.
//! - Provide the form-entry validation rules used by presentation layers.
//!
//! # Invariants
//! - `id` is the unique key inside a `StudentStore` and never changes while
//!   the record is stored.
//! - An unknown birth date is `None` and serializes as the empty string,
//!   never as a placeholder date.
//! - The store itself performs no field validation; `validate_form_input`
//!   exists for callers that collect user input.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date format used by the JSON file and the CSV columns.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Registrar-assigned unique student identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = String;

/// Canonical record for one student.
///
/// Field names in the serialized form are pinned to the JSON file schema
/// consumed by existing rosters, so renames here must keep the serde
/// attributes stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Unique identifier; immutable once the record is stored.
    pub id: StudentId,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// `None` models an unknown or unparseable date of birth.
    #[serde(rename = "dateOfBirth", with = "birth_date_string")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub major: String,
    /// Expected range 0.0-4.0, unenforced.
    pub gpa: f64,
}

/// Validation failure for user-entered student data.
///
/// These rules guard form input only; store and codec paths accept any
/// record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    MissingId,
    MissingFirstName,
    MissingLastName,
    InvalidEmail(String),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "student id is required"),
            Self::MissingFirstName => write!(f, "first name is required"),
            Self::MissingLastName => write!(f, "last name is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email format: `{value}`"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    /// Display name composed from first and last name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks the rules applied to form entry before a record reaches the
    /// store.
    ///
    /// # Contract
    /// - `id`, `first_name` and `last_name` must be non-blank after trimming.
    /// - A blank email is allowed; a non-blank one must look like
    ///   `local@domain`.
    /// - GPA and the remaining fields are never rejected here.
    pub fn validate_form_input(&self) -> Result<(), StudentValidationError> {
        if self.id.trim().is_empty() {
            return Err(StudentValidationError::MissingId);
        }
        if self.first_name.trim().is_empty() {
            return Err(StudentValidationError::MissingFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(StudentValidationError::MissingLastName);
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            return Err(StudentValidationError::InvalidEmail(email.to_string()));
        }

        Ok(())
    }
}

/// Parses a `yyyy-MM-dd` string; anything else is an unknown date.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).ok()
}

/// Formats a birth date for disk; unknown dates become the empty string.
pub fn format_birth_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(BIRTH_DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

mod birth_date_string {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_birth_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Unparseable text degrades to an unknown date instead of failing the
        // whole file.
        let raw = String::deserialize(deserializer)?;
        Ok(super::parse_birth_date(&raw))
    }
}
