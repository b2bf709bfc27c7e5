//! Field descriptors.
//!
//! A [`FieldDescriptor`] is the static metadata of one editable attribute:
//! its name, label, kind, layout and validators. Helper constructors for each
//! kind live in the submodules.

mod checkbox;
mod choice;
mod numeric;
mod temporal;
mod text;

pub use checkbox::{boolean_field, switch_field};
pub use choice::select_field;
pub use numeric::number_field;
pub use temporal::date_field;
pub use text::{email_field, text_field, textarea_field};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;
use crate::validation::{RequiredValidator, Validator};

/// Default number of rows of a textarea.
pub const DEFAULT_TEXTAREA_ROWS: usize = 3;

fn default_rows() -> usize {
    DEFAULT_TEXTAREA_ROWS
}

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label.
    pub label: String,
    /// Value stored in the record when selected.
    pub value: Value,
}

impl SelectOption {
    /// Creates a new option.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Returns the option value as it appears in an HTML `value` attribute.
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// The kind of input a field is edited with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    Textarea {
        #[serde(default = "default_rows")]
        rows: usize,
    },
    Number,
    Boolean,
    Switch,
}

impl FieldKind {
    /// Returns the lowercase kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Select { .. } => "select",
            Self::Textarea { .. } => "textarea",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Switch => "switch",
        }
    }

    /// Returns whether values of this kind are booleans.
    pub fn is_toggle(&self) -> bool {
        matches!(self, Self::Boolean | Self::Switch)
    }
}

/// Number of grid columns a field occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LayoutSpan {
    #[default]
    Single,
    Double,
}

impl TryFrom<u8> for LayoutSpan {
    type Error = FormError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            other => Err(FormError::InvalidSpan(other)),
        }
    }
}

impl From<LayoutSpan> for u8 {
    fn from(span: LayoutSpan) -> Self {
        match span {
            LayoutSpan::Single => 1,
            LayoutSpan::Double => 2,
        }
    }
}

/// Definition of a form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Field name, unique within a field list.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Grid columns occupied.
    pub span: LayoutSpan,
    /// Validators, applied in order.
    pub validators: Vec<Arc<dyn Validator>>,
    /// Value used when no initial record provides one.
    pub default_value: Option<Value>,
    /// Whether the field is required.
    pub required: bool,
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("placeholder", &self.placeholder)
            .field("span", &self.span)
            .field("validators", &self.validators.len())
            .field("default_value", &self.default_value)
            .field("required", &self.required)
            .finish()
    }
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            span: LayoutSpan::Single,
            validators: Vec::new(),
            default_value: None,
            required: false,
        }
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        if !self.required {
            self.required = true;
            self.validators.push(Arc::new(RequiredValidator::new()));
        }
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the layout span.
    #[must_use]
    pub fn span(mut self, span: LayoutSpan) -> Self {
        self.span = span;
        self
    }

    /// Makes the field span both grid columns.
    #[must_use]
    pub fn full_width(self) -> Self {
        self.span(LayoutSpan::Double)
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.push_validator(Arc::new(validator));
        self
    }

    /// Adds a shared validator, marking the field required if it is one.
    pub fn push_validator(&mut self, validator: Arc<dyn Validator>) {
        self.required |= validator.is_required();
        self.validators.push(validator);
    }

    /// Returns the select options, empty for other kinds.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }
}
