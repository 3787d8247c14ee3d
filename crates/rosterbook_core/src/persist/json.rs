//! JSON database file codec.
//!
//! # Responsibility
//! - Write the whole store as a pretty-printed JSON array.
//! - Load a JSON array back into the store, replacing its contents.
//!
//! # Invariants
//! - The file is parsed completely before the store is touched, so a failed
//!   load leaves in-memory records intact.
//! - Missing object fields deserialize to empty/zero defaults instead of
//!   failing the load.

use crate::model::student::Student;
use crate::persist::{PersistError, PersistResult};
use crate::store::student_store::StudentStore;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Saves every record to `path` as a JSON array.
///
/// The file is overwritten in place; there is no atomic-rename step.
///
/// # Errors
/// - `PersistError::Io` when the file cannot be created or written.
/// - `PersistError::Json` when serialization fails.
pub fn save(store: &StudentStore, path: &Path) -> PersistResult<()> {
    let students = store.all();

    let file = File::create(path).map_err(|source| {
        warn!("event=json_save status=error path={} reason=create", path.display());
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &students).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=json_save status=ok path={} records={}",
        path.display(),
        students.len()
    );
    Ok(())
}

/// Loads a JSON array from `path` and replaces the store contents with it.
///
/// Fires one change notification after the replacement. Returns the number
/// of distinct records installed.
///
/// # Errors
/// - `PersistError::Io` when the file is missing or unreadable; the store is
///   untouched.
/// - `PersistError::Json` when the content is not a JSON array of records;
///   the store is untouched.
pub fn load(store: &mut StudentStore, path: &Path) -> PersistResult<usize> {
    let data = fs::read_to_string(path).map_err(|source| {
        warn!("event=json_load status=error path={} reason=read", path.display());
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let students: Vec<Student> = serde_json::from_str(&data).map_err(|source| {
        warn!("event=json_load status=error path={} reason=parse", path.display());
        PersistError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let installed = store.replace_all(students);
    info!(
        "event=json_load status=ok path={} records={installed}",
        path.display()
    );
    Ok(installed)
}
