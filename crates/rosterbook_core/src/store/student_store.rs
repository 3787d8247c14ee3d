//! Authoritative in-memory student map.
//!
//! # Responsibility
//! - Provide CRUD and substring search over the id-keyed student map.
//! - Notify observers after every successful mutation.
//!
//! # Invariants
//! - `id` uniquely determines at most one record; `add` rejects duplicates
//!   instead of overwriting.
//! - Records enter and leave the map whole; there are no partial field
//!   patches.
//! - Observers fire exactly once per successful mutation and once per
//!   wholesale replacement, and must not call back into the store
//!   synchronously.

use crate::model::student::{Student, StudentId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic failure for store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `add` target id is already present.
    DuplicateId(StudentId),
    /// `update`/`remove` target id is absent.
    NotFound(StudentId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "student id already exists: `{id}`"),
            Self::NotFound(id) => write!(f, "student not found: `{id}`"),
        }
    }
}

impl Error for StoreError {}

type ChangeObserver = Box<dyn Fn()>;

/// The process-wide student map, owned by the composition root.
///
/// Ordered by id, matching the sorted-by-key map the roster file has always
/// been written from.
#[derive(Default)]
pub struct StudentStore {
    students: BTreeMap<StudentId, Student>,
    observers: Vec<ChangeObserver>,
}

impl StudentStore {
    /// Creates an empty store with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a no-payload change observer.
    ///
    /// Observers are expected to re-fetch `all()` or `search()` on their own
    /// schedule; the notification carries no description of what changed.
    pub fn subscribe(&mut self, observer: impl Fn() + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Inserts a new record.
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` when the id is already present; the store
    ///   is left unchanged and no notification fires.
    pub fn add(&mut self, student: Student) -> StoreResult<()> {
        if self.students.contains_key(&student.id) {
            return Err(StoreError::DuplicateId(student.id));
        }

        self.students.insert(student.id.clone(), student);
        self.emit_change();
        Ok(())
    }

    /// Replaces an existing record wholesale.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when the id is absent; the store is left
    ///   unchanged and no notification fires.
    pub fn update(&mut self, student: Student) -> StoreResult<()> {
        if !self.students.contains_key(&student.id) {
            return Err(StoreError::NotFound(student.id));
        }

        self.students.insert(student.id.clone(), student);
        self.emit_change();
        Ok(())
    }

    /// Removes a record by id.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when the id is absent.
    pub fn remove(&mut self, id: &str) -> StoreResult<()> {
        if self.students.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.emit_change();
        Ok(())
    }

    /// Returns a clone of the record, or `None` when the id is absent.
    pub fn get(&self, id: &str) -> Option<Student> {
        self.students.get(id).cloned()
    }

    /// Returns clones of every record in ascending id order.
    pub fn all(&self) -> Vec<Student> {
        self.students.values().cloned().collect()
    }

    /// Case-insensitive substring search over id, first name and last name.
    ///
    /// Matching is OR across the three fields. An empty query matches every
    /// record; callers wanting "show all" semantics should use `all()`
    /// directly.
    pub fn search(&self, text: &str) -> Vec<Student> {
        let needle = text.to_lowercase();
        self.students
            .values()
            .filter(|student| {
                student.id.to_lowercase().contains(&needle)
                    || student.first_name.to_lowercase().contains(&needle)
                    || student.last_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Discards the current contents and installs `students` wholesale.
    ///
    /// Used by file load and CSV import, which replace and never merge. When
    /// two incoming records share an id the later one wins. Fires a single
    /// notification for the whole batch, even when the batch is empty.
    ///
    /// Returns the number of distinct records installed.
    pub fn replace_all(&mut self, students: Vec<Student>) -> usize {
        self.students.clear();
        for student in students {
            self.students.insert(student.id.clone(), student);
        }

        self.emit_change();
        self.students.len()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn emit_change(&self) {
        for observer in &self.observers {
            observer();
        }
    }
}
