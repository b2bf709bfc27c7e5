//! Numeric field type.

use super::{FieldDescriptor, FieldKind};
use crate::validation::RangeValidator;

/// Creates a number field, optionally bounded.
pub fn number_field(
    name: &str,
    label: &str,
    min: Option<f64>,
    max: Option<f64>,
    required: bool,
) -> FieldDescriptor {
    let mut field = FieldDescriptor::new(name, label, FieldKind::Number);

    if min.is_some() || max.is_some() {
        field = field.validator(RangeValidator::new(min, max));
    }

    if required {
        field = field.required();
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_number_field() {
        let field = number_field("stock", "Stock", None, None, false);
        assert!(field.validators.is_empty());
    }

    #[test]
    fn test_bounded_number_field() {
        let field = number_field("price", "Price", Some(0.0), None, true);
        assert_eq!(field.validators.len(), 2);
        assert!(field.validators[0].validate(&(-5_i64).into()).is_err());
    }
}
