//! Date field type.

use super::{FieldDescriptor, FieldKind};

/// Creates a date field.
///
/// Values are held as dates while editing and submitted as `YYYY-MM-DD`.
pub fn date_field(name: &str, label: &str, required: bool) -> FieldDescriptor {
    let field = FieldDescriptor::new(name, label, FieldKind::Date);

    if required {
        field.required()
    } else {
        field
    }
}
