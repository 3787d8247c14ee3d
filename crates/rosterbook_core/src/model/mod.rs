//! Domain model for student records.
//!
//! # Responsibility
//! - Define the canonical student record shared by store, persistence and UI.
//! - Keep form-input validation rules next to the data they judge.
//!
//! # Invariants
//! - Every record is identified by a registrar-assigned `StudentId`.
//! - The on-disk JSON field names (`firstName`, `dateOfBirth`, ...) are part
//!   of the model and must not drift.

pub mod student;
