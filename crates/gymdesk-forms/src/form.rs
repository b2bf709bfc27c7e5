//! The dynamic form engine.
//!
//! A [`DynamicForm`] is built from a field list and an optional initial
//! record. The host screen feeds user edits into it, asks which fields to show
//! as invalid, and receives a [`FormEvent`] when the user submits or cancels.
//! The engine never performs I/O.

use std::collections::HashSet;

use serde_json::{Map, Number, Value};
use tracing::{debug, trace, warn};

use crate::error::{FormError, Result, ValidationErrors};
use crate::fields::{FieldDescriptor, FieldKind};
use crate::state::{FieldStatus, FormState};
use crate::value::{DateValue, FieldValue};

/// A record as exchanged with the backend.
pub type Record = Map<String, Value>;

/// The normalized values emitted on submission.
pub type Payload = Map<String, Value>;

/// Label of the submit button unless configured otherwise.
pub const DEFAULT_SUBMIT_LABEL: &str = "Save";

/// Events emitted to the host screen.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The form passed validation; carries the normalized payload.
    Submit(Payload),
    /// The user dismissed the form.
    Cancel,
}

/// Display options supplied by the host screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// The initial record is still being fetched.
    pub loading: bool,
    /// A submission is in flight.
    pub submitting: bool,
    /// Label of the submit button.
    pub submit_label: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            loading: false,
            submitting: false,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
        }
    }
}

/// A form generated from field descriptors.
#[derive(Debug, Clone)]
pub struct DynamicForm {
    fields: Vec<FieldDescriptor>,
    state: FormState,
    options: FormOptions,
}

impl DynamicForm {
    /// Builds a form from a field list and an optional initial record.
    ///
    /// Each field starts with the record's value when the record has the
    /// key (even if that value is `""`, `0`, `false` or `null`), otherwise
    /// with the field's default, otherwise with null.
    pub fn new(fields: Vec<FieldDescriptor>, initial: Option<&Record>) -> Self {
        let mut form = Self {
            fields: Vec::new(),
            state: FormState::new(),
            options: FormOptions::default(),
        };
        form.replace_fields(fields, initial);
        form
    }

    /// Sets the display options.
    #[must_use]
    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the field list and rebuilds the state.
    ///
    /// Field names must be unique; for a duplicated name the first
    /// descriptor is kept.
    pub fn replace_fields(&mut self, fields: Vec<FieldDescriptor>, initial: Option<&Record>) {
        let mut seen = HashSet::new();
        self.fields = fields
            .into_iter()
            .filter(|field| {
                let first = seen.insert(field.name.clone());
                if !first {
                    warn!(field = %field.name, "duplicate field name, keeping the first descriptor");
                }
                first
            })
            .collect();
        self.reinitialize(initial);
    }

    /// Rebuilds the state from the current field list.
    ///
    /// Initialization is one-shot: a record that arrives after construction
    /// (edit mode waiting on a fetch) must be passed in here.
    pub fn reinitialize(&mut self, initial: Option<&Record>) {
        let mut state = FormState::new();

        for field in &self.fields {
            let raw = initial
                .and_then(|record| record.get(&field.name))
                .or(field.default_value.as_ref())
                .cloned()
                .unwrap_or(Value::Null);
            let value = FieldValue::from_json(&field.kind, raw);
            let errors = run_validators(field, &value);
            state.insert(&field.name, value);
            state.set_errors(&field.name, errors);
        }

        self.state = state;
        debug!(
            fields = self.fields.len(),
            with_record = initial.is_some(),
            "form initialized"
        );
    }

    /// Returns the field descriptors.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the descriptor of a field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the form state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the display options.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Marks the initial record as still loading.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Marks a submission as in flight.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.options.submitting = submitting;
    }

    /// Sets the submit button label.
    pub fn set_submit_label(&mut self, label: impl Into<String>) {
        self.options.submit_label = label.into();
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.state.value(name)
    }

    /// Returns a snapshot of one field.
    pub fn status(&self, name: &str) -> Option<FieldStatus<'_>> {
        self.state.status(name)
    }

    /// Applies a user edit.
    ///
    /// Text written into a date field is parsed as on initialization.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into().for_kind(&self.require_field(name)?.kind);
        trace!(field = name, "value edited");
        self.state.edit(name, value);
        self.revalidate(name);
        Ok(())
    }

    /// Applies a user edit given as raw widget text, coerced by field kind.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<()> {
        let value = coerce_input(&self.require_field(name)?.kind, raw);
        self.set_value(name, value)
    }

    /// Writes a value without marking the field dirty.
    pub fn patch_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into().for_kind(&self.require_field(name)?.kind);
        self.state.patch(name, value);
        self.revalidate(name);
        Ok(())
    }

    /// Marks a field as touched (the user left it).
    pub fn mark_touched(&mut self, name: &str) -> Result<()> {
        self.require_field(name)?;
        self.state.touch(name);
        Ok(())
    }

    /// Marks every field as touched.
    pub fn mark_all_touched(&mut self) {
        self.state.touch_all();
    }

    /// Returns whether a field should be shown as invalid: it fails
    /// validation and has been touched or edited. Unknown names are never
    /// invalid.
    pub fn is_invalid(&self, name: &str) -> bool {
        !self.state.is_valid(name) && (self.state.is_touched(name) || self.state.is_dirty(name))
    }

    /// Returns the validation messages of a field, whether shown or not.
    pub fn errors(&self, name: &str) -> &[String] {
        self.state.errors(name)
    }

    /// Returns every field's validation messages.
    pub fn validation_errors(&self) -> &ValidationErrors {
        self.state.validation_errors()
    }

    /// Returns whether every field passes validation.
    pub fn is_valid(&self) -> bool {
        self.state.is_form_valid()
    }

    /// Builds the normalized payload from the current values.
    ///
    /// Date fields holding a parsed date are reduced to `YYYY-MM-DD`; the
    /// time of day is dropped. An unparseable date is sent as null.
    pub fn payload(&self) -> Payload {
        let mut payload = Payload::new();

        for field in &self.fields {
            let Some(value) = self.state.value(&field.name) else {
                continue;
            };
            let json = if matches!(field.kind, FieldKind::Date) {
                if let FieldValue::Date(DateValue::Invalid(raw)) = value {
                    warn!(field = %field.name, input = %raw, "unparseable date submitted as null");
                }
                value.to_date_json()
            } else {
                value.to_json()
            };
            payload.insert(field.name.clone(), json);
        }

        payload
    }

    /// Submits the form.
    ///
    /// When any field fails validation, every field is marked touched so all
    /// errors become visible, and nothing is emitted.
    pub fn on_submit(&mut self) -> Option<FormEvent> {
        if !self.state.is_form_valid() {
            self.state.touch_all();
            debug!(
                invalid_fields = self.state.validation_errors().len(),
                "submission blocked by validation errors"
            );
            return None;
        }

        let payload = self.payload();
        debug!(fields = payload.len(), "form submitted");
        Some(FormEvent::Submit(payload))
    }

    /// Cancels the form. The state is left as is.
    pub fn on_cancel(&self) -> FormEvent {
        debug!("form cancelled");
        FormEvent::Cancel
    }

    fn require_field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn revalidate(&mut self, name: &str) {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            return;
        };
        let errors = match self.state.value(name) {
            Some(value) => run_validators(field, value),
            None => Vec::new(),
        };
        self.state.set_errors(name, errors);
    }
}

fn run_validators(field: &FieldDescriptor, value: &FieldValue) -> Vec<String> {
    field
        .validators
        .iter()
        .filter_map(|validator| validator.validate(value).err())
        .collect()
}

/// Converts raw widget text into a value for a field of `kind`.
fn coerce_input(kind: &FieldKind, raw: &str) -> FieldValue {
    let trimmed = raw.trim();

    match kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Textarea { .. } => {
            FieldValue::Text(raw.to_string())
        }
        FieldKind::Boolean | FieldKind::Switch => {
            FieldValue::Bool(matches!(trimmed, "true" | "on" | "1"))
        }
        _ if trimmed.is_empty() => FieldValue::Null,
        FieldKind::Number => trimmed
            .parse::<i64>()
            .ok()
            .map(FieldValue::from)
            .or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(FieldValue::Number)
            })
            .unwrap_or_else(|| FieldValue::Text(raw.to_string())),
        FieldKind::Date => FieldValue::Date(DateValue::parse_str(trimmed)),
        FieldKind::Select { options } => options
            .iter()
            .find(|option| option.value_string() == trimmed)
            .map_or_else(
                || FieldValue::Text(raw.to_string()),
                |option| FieldValue::from_json(kind, option.value.clone()),
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{date_field, number_field, select_field, switch_field, text_field};
    use serde_json::json;

    fn member_fields() -> Vec<FieldDescriptor> {
        vec![
            text_field("first_name", "First name", 60, true),
            number_field("age", "Age", Some(0.0), Some(120.0), false),
            date_field("birth_date", "Birth date", false),
            select_field("plan_id", "Plan", vec![("Monthly", 1), ("Yearly", 2)], false),
            switch_field("active", "Active", true),
        ]
    }

    #[test]
    fn test_defaults_without_record() {
        let form = DynamicForm::new(member_fields(), None);
        assert_eq!(form.value("first_name"), Some(&FieldValue::Null));
        assert_eq!(form.value("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(form.options().submit_label, "Save");
    }

    #[test]
    fn test_record_key_presence_wins_over_default() {
        let record: Record = serde_json::from_value(json!({
            "first_name": "",
            "age": 0,
            "active": false
        }))
        .unwrap();

        let form = DynamicForm::new(member_fields(), Some(&record));
        assert_eq!(form.value("first_name"), Some(&FieldValue::from("")));
        assert_eq!(form.value("age"), Some(&FieldValue::from(0_i64)));
        assert_eq!(form.value("active"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_set_input_coercion() {
        let mut form = DynamicForm::new(member_fields(), None);

        form.set_input("age", " 42 ").unwrap();
        assert_eq!(form.value("age"), Some(&FieldValue::from(42_i64)));

        form.set_input("age", "").unwrap();
        assert_eq!(form.value("age"), Some(&FieldValue::Null));

        form.set_input("birth_date", "1990-07-01").unwrap();
        assert!(matches!(
            form.value("birth_date"),
            Some(FieldValue::Date(DateValue::Valid(_)))
        ));

        form.set_input("plan_id", "2").unwrap();
        assert_eq!(form.value("plan_id"), Some(&FieldValue::from(2_i64)));

        form.set_input("active", "on").unwrap();
        assert_eq!(form.value("active"), Some(&FieldValue::Bool(true)));
        form.set_input("active", "").unwrap();
        assert_eq!(form.value("active"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_non_numeric_input_fails_range() {
        let mut form = DynamicForm::new(member_fields(), None);
        form.set_input("age", "forty").unwrap();
        assert!(form.is_invalid("age"));
        assert_eq!(form.errors("age"), ["Enter a valid number."]);
    }

    #[test]
    fn test_non_finite_input_is_kept_as_text() {
        let mut form = DynamicForm::new(member_fields(), None);

        for raw in ["NaN", "inf", "1e400"] {
            form.set_input("age", raw).unwrap();
            assert_eq!(form.value("age"), Some(&FieldValue::from(raw)));
            assert_eq!(form.errors("age"), ["Enter a valid number."]);
        }

        form.set_input("age", "2.5").unwrap();
        assert_eq!(form.value("age"), Some(&FieldValue::from(2.5)));
    }

    #[test]
    fn test_set_value_parses_date_text() {
        let mut form = DynamicForm::new(member_fields(), None);
        form.set_value("birth_date", "1990-07-01T18:45:00").unwrap();
        assert!(matches!(
            form.value("birth_date"),
            Some(FieldValue::Date(DateValue::Valid(_)))
        ));

        form.patch_value("birth_date", "").unwrap();
        assert_eq!(form.value("birth_date"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_unknown_field() {
        let mut form = DynamicForm::new(member_fields(), None);
        assert!(matches!(
            form.set_value("nickname", "Al"),
            Err(FormError::UnknownField(name)) if name == "nickname"
        ));
        assert!(form.mark_touched("nickname").is_err());
        assert!(!form.is_invalid("nickname"));
    }

    #[test]
    fn test_patch_value_is_not_shown_invalid() {
        let mut form = DynamicForm::new(member_fields(), None);
        form.patch_value("age", 500_i64).unwrap();
        assert!(!form.is_valid());
        assert!(!form.is_invalid("age"));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let fields = vec![
            text_field("name", "Name", 10, true),
            text_field("name", "Other", 10, false),
        ];
        let form = DynamicForm::new(fields, None);
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.fields()[0].label, "Name");
    }

    #[test]
    fn test_cancel_leaves_state() {
        let mut form = DynamicForm::new(member_fields(), None);
        form.set_value("first_name", "Ana").unwrap();
        assert_eq!(form.on_cancel(), FormEvent::Cancel);
        assert_eq!(form.value("first_name"), Some(&FieldValue::from("Ana")));
        assert!(form.state().is_dirty("first_name"));
    }

    #[test]
    fn test_invalid_date_submits_null() {
        let record: Record = serde_json::from_value(json!({
            "first_name": "Ana",
            "birth_date": "not a date"
        }))
        .unwrap();
        let mut form = DynamicForm::new(member_fields(), Some(&record));

        let Some(FormEvent::Submit(payload)) = form.on_submit() else {
            panic!("expected a submit event");
        };
        assert_eq!(payload["birth_date"], Value::Null);
    }

    #[test]
    fn test_options_setters() {
        let mut form = DynamicForm::new(member_fields(), None).with_options(FormOptions {
            submit_label: "Create member".to_string(),
            ..FormOptions::default()
        });
        form.set_loading(true);
        form.set_submitting(true);

        assert!(form.options().loading);
        assert!(form.options().submitting);
        assert_eq!(form.options().submit_label, "Create member");
    }
}
