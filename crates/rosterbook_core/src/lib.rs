//! Core domain logic for Rosterbook.
//! This crate is the single source of truth for student roster invariants.

pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{Student, StudentId, StudentValidationError, BIRTH_DATE_FORMAT};
pub use persist::{PersistError, PersistResult};
pub use service::student_service::StudentService;
pub use store::student_store::{StoreError, StoreResult, StudentStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
