//! Checkbox and switch field types.

use super::{FieldDescriptor, FieldKind};

/// Creates a boolean field (checkbox), unchecked by default.
pub fn boolean_field(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, FieldKind::Boolean).default_value(false)
}

/// Creates a switch-style toggle with the given default state.
pub fn switch_field(name: &str, label: &str, on: bool) -> FieldDescriptor {
    FieldDescriptor::new(name, label, FieldKind::Switch).default_value(on)
}
