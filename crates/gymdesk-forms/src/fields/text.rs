//! Text field types.

use super::{FieldDescriptor, FieldKind};
use crate::validation::{EmailValidator, MaxLengthValidator};

/// Creates a single-line text field with a maximum length.
pub fn text_field(name: &str, label: &str, max_length: usize, required: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(name, label, FieldKind::Text)
        .validator(MaxLengthValidator::new(max_length));

    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a multi-line text field spanning both grid columns.
pub fn textarea_field(name: &str, label: &str, rows: usize, required: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(name, label, FieldKind::Textarea { rows }).full_width();

    if required {
        field.required()
    } else {
        field
    }
}

/// Creates an email field.
pub fn email_field(name: &str, label: &str, required: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(name, label, FieldKind::Email)
        .validator(EmailValidator::new())
        .placeholder("name@example.com");

    if required {
        field.required()
    } else {
        field
    }
}
