//! In-memory record store.
//!
//! # Responsibility
//! - Own the authoritative id-to-student map for the process.
//! - Fan out no-payload change notifications to registered observers.
//!
//! # Invariants
//! - An id maps to at most one student at any time.
//! - Callers only ever receive clones of stored records.

pub mod student_store;
