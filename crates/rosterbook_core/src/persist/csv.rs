//! CSV bulk import/export codec.
//!
//! # Responsibility
//! - Export the roster as RFC-4180-style CSV with a fixed header row.
//! - Import a CSV roster, matching headers case-insensitively in any order.
//!
//! # Invariants
//! - Header validation happens before the store is touched; a missing
//!   required column leaves in-memory records intact.
//! - Data rows with the wrong field count or a blank id are skipped, never
//!   fatal.
//! - Quoting is symmetric: export doubles embedded quotes and the import
//!   splitter un-escapes them, so quoted fields round-trip.

use crate::model::student::{format_birth_date, parse_birth_date, Student};
use crate::persist::{PersistError, PersistResult};
use crate::store::student_store::StudentStore;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_ID: &str = "ID";
const HEADER_FIRST_NAME: &str = "FirstName";
const HEADER_LAST_NAME: &str = "LastName";
const HEADER_DATE_OF_BIRTH: &str = "DateOfBirth";
const HEADER_GENDER: &str = "Gender";
const HEADER_EMAIL: &str = "Email";
const HEADER_PHONE: &str = "Phone";
const HEADER_ADDRESS: &str = "Address";
const HEADER_MAJOR: &str = "Major";
const HEADER_GPA: &str = "GPA";

const REQUIRED_HEADERS: [&str; 10] = [
    HEADER_ID,
    HEADER_FIRST_NAME,
    HEADER_LAST_NAME,
    HEADER_DATE_OF_BIRTH,
    HEADER_GENDER,
    HEADER_EMAIL,
    HEADER_PHONE,
    HEADER_ADDRESS,
    HEADER_MAJOR,
    HEADER_GPA,
];

/// Writes the whole roster to `path` as CSV, one record per line in id
/// order, headed by the fixed column row.
///
/// # Errors
/// - `PersistError::Io` when the file cannot be created or written.
pub fn export(store: &StudentStore, path: &Path) -> PersistResult<()> {
    let file = File::create(path).map_err(|source| {
        warn!("event=csv_export status=error path={} reason=create", path.display());
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut writer = BufWriter::new(file);

    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let students = store.all();
    writeln!(writer, "{}", REQUIRED_HEADERS.join(",")).map_err(io_err)?;
    for student in &students {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{:.2}",
            escape_field(&student.id),
            escape_field(&student.first_name),
            escape_field(&student.last_name),
            format_birth_date(student.date_of_birth),
            escape_field(&student.gender),
            escape_field(&student.email),
            escape_field(&student.phone),
            escape_field(&student.address),
            escape_field(&student.major),
            student.gpa,
        )
        .map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(
        "event=csv_export status=ok path={} records={}",
        path.display(),
        students.len()
    );
    Ok(())
}

/// Reads a CSV roster from `path` and replaces the store contents with it.
///
/// Header names are matched case-insensitively and may appear in any order;
/// columns beyond the required ten are ignored. Fires one change
/// notification after the replacement. Returns the number of distinct
/// records installed.
///
/// # Errors
/// - `PersistError::Io` when the file cannot be read; the store is
///   untouched.
/// - `PersistError::MissingHeader` when a required column is absent; the
///   store is untouched.
pub fn import(store: &mut StudentStore, path: &Path) -> PersistResult<usize> {
    let data = fs::read_to_string(path).map_err(|source| {
        warn!("event=csv_import status=error path={} reason=read", path.display());
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut lines = data.lines();
    let header_line = lines.next().unwrap_or_default();
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let columns = map_columns(&headers).map_err(|column| {
        warn!(
            "event=csv_import status=error path={} missing_header={column}",
            path.display()
        );
        PersistError::MissingHeader {
            path: path.to_path_buf(),
            column,
        }
    })?;

    let mut imported = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() != headers.len() {
            warn!(
                "event=csv_import status=skip reason=field_count expected={} got={}",
                headers.len(),
                fields.len()
            );
            skipped += 1;
            continue;
        }

        let student = columns.build_student(&fields);
        if student.id.is_empty() {
            debug!("event=csv_import status=skip reason=blank_id");
            skipped += 1;
            continue;
        }
        imported.push(student);
    }

    let installed = store.replace_all(imported);
    info!(
        "event=csv_import status=ok path={} records={installed} skipped={skipped}",
        path.display()
    );
    Ok(installed)
}

/// Column index of each required field inside one parsed header row.
struct ColumnMap {
    id: usize,
    first_name: usize,
    last_name: usize,
    date_of_birth: usize,
    gender: usize,
    email: usize,
    phone: usize,
    address: usize,
    major: usize,
    gpa: usize,
}

impl ColumnMap {
    fn build_student(&self, fields: &[String]) -> Student {
        let value = |index: usize| fields[index].trim().to_string();
        Student {
            id: value(self.id),
            first_name: value(self.first_name),
            last_name: value(self.last_name),
            date_of_birth: parse_birth_date(&fields[self.date_of_birth]),
            gender: value(self.gender),
            email: value(self.email),
            phone: value(self.phone),
            address: value(self.address),
            major: value(self.major),
            gpa: fields[self.gpa].trim().parse().unwrap_or(0.0),
        }
    }
}

fn map_columns(headers: &[&str]) -> Result<ColumnMap, &'static str> {
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or(name)
    };

    Ok(ColumnMap {
        id: find(HEADER_ID)?,
        first_name: find(HEADER_FIRST_NAME)?,
        last_name: find(HEADER_LAST_NAME)?,
        date_of_birth: find(HEADER_DATE_OF_BIRTH)?,
        gender: find(HEADER_GENDER)?,
        email: find(HEADER_EMAIL)?,
        phone: find(HEADER_PHONE)?,
        address: find(HEADER_ADDRESS)?,
        major: find(HEADER_MAJOR)?,
        gpa: find(HEADER_GPA)?,
    })
}

/// Quotes a field iff it contains a comma, quote or newline, doubling any
/// embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits one CSV line on commas outside quoted sections.
///
/// A doubled quote inside a quoted section is a literal quote. The
/// surrounding quotes themselves are not part of the field value.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            other => field.push(other),
        }
    }
    fields.push(field);
    fields
}
