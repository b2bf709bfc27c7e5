//! Error types for forms.

use std::collections::HashMap;
use thiserror::Error;

/// Form-specific errors.
///
/// Validation failures are not errors: they block submission and show up
/// through [`ValidationErrors`] and the touched/dirty flags instead.
#[derive(Debug, Error)]
pub enum FormError {
    /// No field with this name exists in the form.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Two descriptors in one field list share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// Layout span outside of 1 or 2.
    #[error("invalid layout span {0}, expected 1 or 2")]
    InvalidSpan(u8),

    /// A pattern rule failed to compile.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Field schema parsing error.
    #[error("failed to parse field schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Errors reported by the record backend a screen talks to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The requested record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never reached the backend.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Collection of validation errors by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Replaces all errors of a field. An empty list clears the field.
    pub fn replace(&mut self, field: &str, messages: Vec<String>) {
        if messages.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), messages);
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns whether a field has at least one error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, messages) in fields {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
