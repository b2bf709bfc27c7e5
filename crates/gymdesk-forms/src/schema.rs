//! Field lists described as JSON.
//!
//! ```json
//! [
//!   {"name": "first_name", "label": "First name", "kind": "text",
//!    "rules": [{"type": "required"}, {"type": "max_length", "value": 60}]},
//!   {"name": "plan_id", "label": "Plan", "kind": "select", "span": 2,
//!    "options": [{"label": "Monthly", "value": 1}]}
//! ]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, Result};
use crate::fields::{FieldDescriptor, FieldKind, LayoutSpan};
use crate::validation::Rule;

/// Serializable form of a [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub span: LayoutSpan,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl TryFrom<FieldSpec> for FieldDescriptor {
    type Error = FormError;

    fn try_from(spec: FieldSpec) -> Result<Self> {
        let mut field = Self::new(spec.name, spec.label, spec.kind).span(spec.span);
        field.placeholder = spec.placeholder;
        field.default_value = spec.default;

        for rule in &spec.rules {
            let validator = rule.build().map_err(|source| FormError::InvalidPattern {
                field: field.name.clone(),
                source,
            })?;
            field.push_validator(validator);
        }

        Ok(field)
    }
}

/// Parses a JSON array of field specs into descriptors.
///
/// Rejects duplicate names, spans other than 1 or 2 and patterns that do
/// not compile.
pub fn parse_fields(json: &str) -> Result<Vec<FieldDescriptor>> {
    let specs: Vec<FieldSpec> = serde_json::from_str(json)?;
    fields_from_specs(specs)
}

/// Converts field specs into descriptors, rejecting duplicate names.
pub fn fields_from_specs(specs: Vec<FieldSpec>) -> Result<Vec<FieldDescriptor>> {
    let mut seen = HashSet::new();
    specs
        .into_iter()
        .map(|spec| {
            if !seen.insert(spec.name.clone()) {
                return Err(FormError::DuplicateField(spec.name));
            }
            FieldDescriptor::try_from(spec)
        })
        .collect()
}
