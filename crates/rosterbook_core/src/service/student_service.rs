//! Student roster use-case service.
//!
//! # Responsibility
//! - Own the store and the database path for one application instance.
//! - Provide the startup-load / shutdown-save lifecycle and the CSV bulk
//!   operations.
//!
//! # Invariants
//! - There is exactly one service (and thus one store) per composition
//!   root; nothing here is a process-wide global.
//! - A missing database file at startup is a fresh roster, not an error.

use crate::model::student::Student;
use crate::persist::{csv, json, PersistResult};
use crate::store::student_store::{StoreResult, StudentStore};
use log::info;
use std::path::{Path, PathBuf};

/// Facade over the student store and its persistence, owned by the
/// application's composition root and handed by reference to consumers.
pub struct StudentService {
    store: StudentStore,
    database_path: PathBuf,
}

impl StudentService {
    /// Creates a service with an empty store. Performs no I/O.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            store: StudentStore::new(),
            database_path: database_path.into(),
        }
    }

    /// Path of the JSON database file this service loads and saves.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Startup load from the owned database path.
    ///
    /// A missing file means the roster has never been saved; the store stays
    /// empty and `Ok(0)` is returned. Any other failure is propagated and
    /// leaves the store untouched.
    pub fn load(&mut self) -> PersistResult<usize> {
        if !self.database_path.exists() {
            info!(
                "event=roster_load status=fresh path={}",
                self.database_path.display()
            );
            return Ok(0);
        }

        json::load(&mut self.store, &self.database_path)
    }

    /// Shutdown save to the owned database path.
    pub fn save(&self) -> PersistResult<()> {
        json::save(&self.store, &self.database_path)
    }

    /// Replaces the roster with the contents of a CSV file.
    pub fn import_csv(&mut self, path: &Path) -> PersistResult<usize> {
        csv::import(&mut self.store, path)
    }

    /// Writes the roster to a CSV file.
    pub fn export_csv(&self, path: &Path) -> PersistResult<()> {
        csv::export(&self.store, path)
    }

    /// Registers a no-payload change observer on the underlying store.
    pub fn subscribe(&mut self, observer: impl Fn() + 'static) {
        self.store.subscribe(observer);
    }

    /// Inserts a new record. See [`StudentStore::add`].
    pub fn add(&mut self, student: Student) -> StoreResult<()> {
        self.store.add(student)
    }

    /// Replaces an existing record wholesale. See [`StudentStore::update`].
    pub fn update(&mut self, student: Student) -> StoreResult<()> {
        self.store.update(student)
    }

    /// Removes a record by id. See [`StudentStore::remove`].
    pub fn remove(&mut self, id: &str) -> StoreResult<()> {
        self.store.remove(id)
    }

    /// Returns a clone of the record, or `None` when absent.
    pub fn get(&self, id: &str) -> Option<Student> {
        self.store.get(id)
    }

    /// Returns every record in ascending id order.
    pub fn all(&self) -> Vec<Student> {
        self.store.all()
    }

    /// Case-insensitive substring search over id and names.
    ///
    /// Callers rendering a search box should bypass this for blank input and
    /// show `all()` instead, matching the original list behavior.
    pub fn search(&self, text: &str) -> Vec<Student> {
        self.store.search(text)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the roster holds no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
