//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{BootstrapCheckbox, BootstrapInput, BootstrapSelect, BootstrapTextarea};

use std::collections::BTreeMap;

use crate::fields::{FieldDescriptor, FieldKind};
use crate::value::FieldValue;

/// Attributes that can be applied to a widget.
///
/// Attributes render in key order so output is stable.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Renders the attributes except `id` and `class`, each with a leading
    /// space.
    pub fn extra_html(&self) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| k.as_str() != "class" && k.as_str() != "id")
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the `id` attribute, defaulting to `id_<name>`.
    pub fn id_or_default(&self, name: &str) -> String {
        self.get("id")
            .cloned()
            .unwrap_or_else(|| format!("id_{name}"))
    }

    /// Returns `base` followed by the `class` attribute, if set.
    pub fn class_with(&self, base: &str) -> String {
        match self.get("class") {
            Some(extra) => format!("{base} {extra}"),
            None => base.to_string(),
        }
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: &FieldValue, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Picks the widget that edits a field.
pub fn widget_for(field: &FieldDescriptor) -> Box<dyn Widget> {
    let placeholder = field.placeholder.clone();

    match &field.kind {
        FieldKind::Text => Box::new(BootstrapInput::text().with_placeholder(placeholder)),
        FieldKind::Email => Box::new(BootstrapInput::email().with_placeholder(placeholder)),
        FieldKind::Number => Box::new(BootstrapInput::number().with_placeholder(placeholder)),
        FieldKind::Date => Box::new(BootstrapInput::date()),
        FieldKind::Textarea { rows } => {
            Box::new(BootstrapTextarea::new(*rows).with_placeholder(placeholder))
        }
        FieldKind::Select { options } => {
            let select = BootstrapSelect::new(options.clone());
            Box::new(match placeholder {
                Some(blank) => select.blank_label(blank),
                None => select,
            })
        }
        FieldKind::Boolean => Box::new(BootstrapCheckbox::new().label(&field.label)),
        FieldKind::Switch => Box::new(BootstrapCheckbox::switch().label(&field.label)),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{date_field, select_field, switch_field};

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "is-invalid")
            .with("id", "id_email")
            .with("required", "required")
            .with("disabled", "disabled");
        assert_eq!(attrs.extra_html(), r#" disabled="disabled" required="required""#);
        assert_eq!(attrs.class_with("form-control"), "form-control is-invalid");
        assert_eq!(attrs.id_or_default("email"), "id_email");
        assert_eq!(WidgetAttrs::new().id_or_default("email"), "id_email");
    }

    #[test]
    fn test_widget_for_kind() {
        assert_eq!(widget_for(&date_field("d", "D", false)).input_type(), "date");
        assert_eq!(
            widget_for(&select_field("s", "S", vec![("A", "a")], false)).input_type(),
            "select"
        );
        assert_eq!(
            widget_for(&switch_field("on", "On", false)).input_type(),
            "checkbox"
        );
    }
}
