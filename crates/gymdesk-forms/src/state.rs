//! Per-field form state.
//!
//! [`FormState`] keeps one map per concern (values, initial values, dirty,
//! touched, errors) keyed by field name. It is rebuilt by the engine on
//! initialization and updated synchronously by every mutating call; nothing is
//! derived lazily.

use std::collections::{HashMap, HashSet};

use crate::error::ValidationErrors;
use crate::value::FieldValue;

/// Snapshot of one field's state.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStatus<'a> {
    /// Current value.
    pub value: &'a FieldValue,
    /// Whether a user edit changed the value at least once.
    pub dirty: bool,
    /// Whether the user left the field at least once.
    pub touched: bool,
    /// Whether the value passes every validator.
    pub valid: bool,
}

/// Values, interaction flags and validation errors of a form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    order: Vec<String>,
    values: HashMap<String, FieldValue>,
    initial: HashMap<String, FieldValue>,
    dirty: HashSet<String>,
    touched: HashSet<String>,
    errors: ValidationErrors,
}

impl FormState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field with its initial value. Returns false if the name is
    /// already taken, leaving the existing entry untouched.
    pub(crate) fn insert(&mut self, name: &str, value: FieldValue) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.order.push(name.to_string());
        self.initial.insert(name.to_string(), value.clone());
        self.values.insert(name.to_string(), value);
        true
    }

    /// Stores a user edit. The field becomes dirty once its value differs
    /// from the initial one, and stays dirty.
    pub(crate) fn edit(&mut self, name: &str, value: FieldValue) {
        if self.initial.get(name) != Some(&value) {
            self.dirty.insert(name.to_string());
        }
        self.values.insert(name.to_string(), value);
    }

    /// Stores a programmatic value without touching the dirty flag.
    pub(crate) fn patch(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_string());
    }

    pub(crate) fn touch_all(&mut self) {
        self.touched.extend(self.order.iter().cloned());
    }

    pub(crate) fn set_errors(&mut self, name: &str, messages: Vec<String>) {
        self.errors.replace(name, messages);
    }

    /// Returns whether the field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns `(name, value)` pairs in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the value a field was initialized with.
    pub fn initial_value(&self, name: &str) -> Option<&FieldValue> {
        self.initial.get(name)
    }

    /// Returns whether the user changed a field from its initial value.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    /// Returns whether the user left a field.
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Returns whether any field was edited.
    pub fn is_form_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the error messages of a field.
    pub fn errors(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns every field's errors.
    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns whether a field passes validation. Unknown fields are valid.
    pub fn is_valid(&self, name: &str) -> bool {
        !self.errors.contains(name)
    }

    /// Returns whether every field passes validation.
    pub fn is_form_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a snapshot of one field.
    pub fn status(&self, name: &str) -> Option<FieldStatus<'_>> {
        self.values.get(name).map(|value| FieldStatus {
            value,
            dirty: self.is_dirty(name),
            touched: self.is_touched(name),
            valid: self.is_valid(name),
        })
    }
}
