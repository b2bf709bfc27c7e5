//! Bootstrap 5 form widgets.

use super::{html_escape, Widget, WidgetAttrs};
use crate::fields::SelectOption;
use crate::value::FieldValue;

fn placeholder_attr(placeholder: Option<&String>) -> String {
    placeholder
        .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
        .unwrap_or_default()
}

/// Bootstrap 5 single-line input (text, email, number, date).
#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// The HTML input type.
    pub input_type: &'static str,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl BootstrapInput {
    fn of_type(input_type: &'static str) -> Self {
        Self {
            input_type,
            placeholder: None,
        }
    }

    /// Creates a text input.
    pub fn text() -> Self {
        Self::of_type("text")
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type("email")
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self::of_type("number")
    }

    /// Creates a date input. Values render as `YYYY-MM-DD`.
    pub fn date() -> Self {
        Self::of_type("date")
    }

    /// Sets or clears the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for BootstrapInput {
    fn render(&self, name: &str, value: &FieldValue, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .to_input_string()
            .map(|v| format!(r#" value="{}""#, html_escape(&v)))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{value_attr}{}{}>"#,
            self.input_type,
            attrs.class_with("form-control"),
            attrs.id_or_default(name),
            name,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.extra_html(),
        )
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets or clears the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: &FieldValue, attrs: &WidgetAttrs) -> String {
        let content = value
            .to_input_string()
            .map(|v| html_escape(&v))
            .unwrap_or_default();

        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{}{}>{content}</textarea>"#,
            attrs.class_with("form-control"),
            attrs.id_or_default(name),
            name,
            self.rows,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.extra_html(),
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available options, in display order.
    pub options: Vec<SelectOption>,
    /// Label of the leading empty option.
    pub blank_label: String,
}

impl BootstrapSelect {
    /// Creates a new select with the given options.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            blank_label: "Select...".to_string(),
        }
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: &FieldValue, attrs: &WidgetAttrs) -> String {
        let current = value.to_input_string();

        let mut options = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.blank_label)
        );

        for option in &self.options {
            let option_value = option.value_string();
            let selected = current.as_deref() == Some(option_value.as_str());
            let selected_attr = if selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(&option_value),
                html_escape(&option.label)
            ));
        }

        format!(
            r#"<select class="{}" id="{}" name="{}"{}>{options}</select>"#,
            attrs.class_with("form-select"),
            attrs.id_or_default(name),
            name,
            attrs.extra_html(),
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Bootstrap 5 checkbox widget, optionally styled as a switch.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    /// Label next to the box.
    pub label: Option<String>,
    /// Whether to use switch style.
    pub is_switch: bool,
}

impl BootstrapCheckbox {
    /// Creates a new checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch-style checkbox.
    pub fn switch() -> Self {
        Self {
            is_switch: true,
            ..Default::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for BootstrapCheckbox {
    fn render(&self, name: &str, value: &FieldValue, attrs: &WidgetAttrs) -> String {
        let id = attrs.id_or_default(name);
        let checked_attr = if matches!(value, FieldValue::Bool(true)) {
            " checked"
        } else {
            ""
        };

        let wrapper_class = if self.is_switch {
            "form-check form-switch"
        } else {
            "form-check"
        };

        let label_html = self
            .label
            .as_ref()
            .map(|l| {
                format!(
                    r#"<label class="form-check-label" for="{id}">{}</label>"#,
                    html_escape(l)
                )
            })
            .unwrap_or_default();

        let role_attr = if self.is_switch { r#" role="switch""# } else { "" };

        format!(
            r#"<div class="{wrapper_class}"><input class="{}" type="checkbox"{role_attr} id="{id}" name="{name}" value="true"{checked_attr}{}>{label_html}</div>"#,
            attrs.class_with("form-check-input"),
            attrs.extra_html(),
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_text_input_with_placeholder() {
        let widget = BootstrapInput::text().with_placeholder(Some("Jane".to_string()));
        let html = widget.render("first_name", &FieldValue::Null, &WidgetAttrs::new());
        assert_eq!(
            html,
            r#"<input type="text" class="form-control" id="id_first_name" name="first_name" placeholder="Jane">"#
        );
    }

    #[test]
    fn test_date_input_renders_calendar_date() {
        let value = FieldValue::from(
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        );
        let html = BootstrapInput::date().render("dob", &value, &WidgetAttrs::new());
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains(r#"value="2024-03-15""#));
    }

    #[test]
    fn test_input_escapes_value() {
        let html = BootstrapInput::text().render(
            "notes",
            &FieldValue::from(r#""quoted" <b>"#),
            &WidgetAttrs::new().with("class", "is-invalid"),
        );
        assert!(html.contains("&quot;quoted&quot; &lt;b&gt;"));
        assert!(html.contains(r#"class="form-control is-invalid""#));
    }

    #[test]
    fn test_textarea() {
        let widget = BootstrapTextarea::new(6);
        let html = widget.render("content", &"Hello".into(), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-control""#));
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains(">Hello</textarea>"));
    }

    #[test]
    fn test_select_marks_numeric_option() {
        let widget = BootstrapSelect::new(vec![
            SelectOption::new("Cash", 1),
            SelectOption::new("Card", 2),
        ]);
        let html = widget.render("payment_method_id", &FieldValue::from(2_i64), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-select""#));
        assert!(html.contains(r#"<option value="">Select...</option>"#));
        assert!(html.contains(r#"<option value="2" selected>Card</option>"#));
        assert!(!html.contains(r#"value="1" selected"#));
    }

    #[test]
    fn test_checkbox() {
        let widget = BootstrapCheckbox::new().label("Has locker");
        let html = widget.render("has_locker", &true.into(), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-check""#));
        assert!(html.contains(" checked"));
        assert!(html.contains("Has locker"));
    }

    #[test]
    fn test_switch() {
        let widget = BootstrapCheckbox::switch();
        let html = widget.render("active", &false.into(), &WidgetAttrs::new());
        assert!(html.contains("form-switch"));
        assert!(html.contains(r#"role="switch""#));
        assert!(!html.contains(" checked"));
    }
}
