//! Select field type.

use serde_json::Value;

use super::{FieldDescriptor, FieldKind, SelectOption};

/// Creates a select (dropdown) field from `(label, value)` pairs.
pub fn select_field<V: Into<Value>>(
    name: &str,
    label: &str,
    choices: Vec<(&str, V)>,
    required: bool,
) -> FieldDescriptor {
    let options = choices
        .into_iter()
        .map(|(label, value)| SelectOption::new(label, value))
        .collect();

    let field = FieldDescriptor::new(name, label, FieldKind::Select { options });

    if required {
        field.required()
    } else {
        field
    }
}
