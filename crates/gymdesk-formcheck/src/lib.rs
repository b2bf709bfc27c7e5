//! # gymdesk-formcheck
//!
//! Drives a [`DynamicForm`] from files so form schemas can be checked without
//! a browser: load a field schema and an optional record, apply edits the way
//! a user would, then inspect field state, the submit payload, or the
//! rendered HTML.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use gymdesk_forms::{
    parse_fields, DynamicForm, FormError, FormEvent, Payload, Record, ValidationErrors,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while preparing a form.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema is invalid, or an edit names an unknown field.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The record file is not a JSON object.
    #[error("invalid record in {path}: {message}")]
    Record { path: PathBuf, message: String },

    /// An edit is not of the form `name=value`.
    #[error("invalid assignment {0:?}, expected name=value")]
    Assignment(String),
}

/// Result type alias for formcheck operations.
pub type Result<T> = std::result::Result<T, CheckError>;

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON record file.
pub fn load_record(path: &Path) -> Result<Record> {
    let text = read(path)?;
    let invalid = |message: String| CheckError::Record {
        path: path.to_path_buf(),
        message,
    };
    match serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))? {
        serde_json::Value::Object(record) => Ok(record),
        other => Err(invalid(format!("expected an object, found {other}"))),
    }
}

/// Builds a form from a schema file and an optional record file.
pub fn load_form(schema: &Path, record: Option<&Path>) -> Result<DynamicForm> {
    let fields = parse_fields(&read(schema)?)?;
    info!(schema = %schema.display(), fields = fields.len(), "schema loaded");

    let record = record.map(load_record).transpose()?;
    Ok(DynamicForm::new(fields, record.as_ref()))
}

/// Parses a `name=value` edit. The value may be empty or contain `=`.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CheckError::Assignment(input.to_string())),
    }
}

/// Applies edits as user input: each field receives the raw text and is then
/// left, so it counts as touched.
pub fn apply_assignments(form: &mut DynamicForm, assignments: &[(String, String)]) -> Result<()> {
    for (name, value) in assignments {
        debug!(field = %name, value = %value, "applying edit");
        form.set_input(name, value)?;
        form.mark_touched(name)?;
    }
    Ok(())
}

/// Describes every field: value, interaction flags and visible errors.
pub fn status_report(form: &DynamicForm) -> String {
    let mut report = String::new();

    for field in form.fields() {
        let Some(status) = form.status(&field.name) else {
            continue;
        };
        let _ = write!(
            report,
            "{} ({}) = {}",
            field.name,
            field.kind.as_str(),
            status.value.to_json()
        );
        if status.dirty {
            report.push_str(" [dirty]");
        }
        if status.touched {
            report.push_str(" [touched]");
        }
        if form.is_invalid(&field.name) {
            let _ = write!(report, " invalid: {}", form.errors(&field.name).join("; "));
        }
        report.push('\n');
    }

    report
}

/// Submits the form, returning the payload or the errors that blocked it.
pub fn submit(form: &mut DynamicForm) -> std::result::Result<Payload, ValidationErrors> {
    match form.on_submit() {
        Some(FormEvent::Submit(payload)) => Ok(payload),
        _ => Err(form.validation_errors().clone()),
    }
}
