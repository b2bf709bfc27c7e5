//! Bootstrap 5 rendering of a [`DynamicForm`].
//!
//! Error feedback follows the same gate as [`DynamicForm::is_invalid`]: a
//! field that fails validation but was never touched or edited renders
//! without error styling.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;

use crate::fields::{FieldDescriptor, LayoutSpan};
use crate::form::{DynamicForm, FormOptions};
use crate::widgets::{widget_for, WidgetAttrs};

const SPINNER_HTML: &str =
    r#"<span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>"#;

/// Returns the grid column class for a layout span.
pub fn column_class(span: LayoutSpan) -> &'static str {
    match span {
        LayoutSpan::Single => "col-md-6",
        LayoutSpan::Double => "col-12",
    }
}

/// Renders one field: label, widget and visible error messages.
pub fn render_field(form: &DynamicForm, field: &FieldDescriptor) -> String {
    let id = format!("id_{}", field.name);
    let invalid = form.is_invalid(&field.name);
    let errors: &[String] = if invalid { form.errors(&field.name) } else { &[] };

    let mut attrs = WidgetAttrs::new().with("id", &id);
    if invalid {
        attrs.set("class", "is-invalid");
    }
    if field.required {
        attrs.set("required", "required");
    }
    if form.options().submitting {
        attrs.set("disabled", "disabled");
    }

    let value = form.value(&field.name).cloned().unwrap_or_default();
    let widget_html = widget_for(field).render(&field.name, &value, &attrs);

    // Checkboxes carry their own label.
    let label_html = if field.kind.is_toggle() {
        String::new()
    } else {
        let required_marker = if field.required { " *" } else { "" };
        let label_text = format!("{}{}", field.label, required_marker);
        html! {
            label.for_(#id).class("form-label") { #label_text }
        }
        .render()
    };

    html! { div.class("mb-3") }
        .raw(&label_html)
        .raw(&widget_html)
        .children(errors, |error, div: Element<Div>| {
            div.class("invalid-feedback d-block").text(error)
        })
        .render()
}

/// Renders the loading skeleton shown in place of a field.
fn render_placeholder(field: &FieldDescriptor) -> String {
    let label = field.label.clone();
    html! { div.class("mb-3 placeholder-glow") }
        .attr("aria-hidden", "true")
        .child::<Div, _>(|d| d.class("form-label text-muted").text(&label))
        .child::<Div, _>(|d| d.class("placeholder col-12 rounded"))
        .render()
}

/// Renders the cancel and submit buttons.
fn render_actions(options: &FormOptions) -> String {
    let busy = options.loading || options.submitting;

    let cancel = html! {
        button.type_("button").class("btn btn-outline-secondary") {
            "Cancel"
        }
    };
    let cancel = if busy {
        cancel.attr("disabled", "disabled")
    } else {
        cancel
    };

    let submit = html! {
        button.type_("submit").class("btn btn-primary")
    };
    let submit = if busy {
        submit.attr("disabled", "disabled")
    } else {
        submit
    };
    let submit = if options.submitting {
        submit.raw(SPINNER_HTML)
    } else {
        submit
    }
    .text(&options.submit_label);

    format!("{}{}", cancel.render(), submit.render())
}

/// Renders the complete form as a two-column Bootstrap grid.
///
/// While `loading` is set every field renders as a placeholder skeleton.
pub fn render_form(form: &DynamicForm) -> String {
    let options = form.options();

    let columns: Vec<(&str, String)> = form
        .fields()
        .iter()
        .map(|field| {
            let field_html = if options.loading {
                render_placeholder(field)
            } else {
                render_field(form, field)
            };
            (column_class(field.span), field_html)
        })
        .collect();
    let actions_html = render_actions(options);

    html! { form.class("dynamic-form") }
        .attr("novalidate", "novalidate")
        .child::<Div, _>(|d| {
            columns.iter().fold(d.class("row g-3"), |grid, (column, field_html)| {
                grid.child::<Div, _>(|c| c.class(*column).raw(field_html))
            })
        })
        .child::<Div, _>(|d| {
            d.class("d-flex justify-content-end gap-2 mt-4")
                .raw(&actions_html)
        })
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{email_field, switch_field, text_field, textarea_field};
    use crate::form::FormOptions;

    fn form() -> DynamicForm {
        DynamicForm::new(
            vec![
                text_field("first_name", "First name", 60, true),
                email_field("email", "Email", false),
                textarea_field("notes", "Notes", 4, false),
                switch_field("active", "Active", true),
            ],
            None,
        )
    }

    #[test]
    fn test_column_classes() {
        assert_eq!(column_class(LayoutSpan::Single), "col-md-6");
        assert_eq!(column_class(LayoutSpan::Double), "col-12");
    }

    #[test]
    fn test_pristine_field_has_no_error_markup() {
        let form = form();
        let field = form.field("first_name").unwrap();
        let html = render_field(&form, field);

        assert!(html.contains("First name *"));
        assert!(html.contains(r#"required="required""#));
        assert!(!html.contains("is-invalid"));
        assert!(!html.contains("This field is required."));
    }

    #[test]
    fn test_touched_field_shows_errors() {
        let mut form = form();
        form.mark_touched("first_name").unwrap();
        let field = form.field("first_name").unwrap();
        let html = render_field(&form, field);

        assert!(html.contains("is-invalid"));
        assert!(html.contains("invalid-feedback"));
        assert!(html.contains("This field is required."));
    }

    #[test]
    fn test_switch_has_no_separate_label() {
        let form = form();
        let html = render_field(&form, form.field("active").unwrap());
        assert!(!html.contains("form-label"));
        assert!(html.contains("form-switch"));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn test_render_form_layout_and_label() {
        let form = form().with_options(FormOptions {
            submit_label: "Create member".to_string(),
            ..FormOptions::default()
        });
        let html = render_form(&form);

        assert!(html.contains("col-md-6"));
        assert!(html.contains("col-12"));
        assert!(html.contains("Create member"));
        assert!(html.contains("Cancel"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_loading_renders_placeholders() {
        let mut form = form();
        form.set_loading(true);
        let html = render_form(&form);

        assert!(html.contains("placeholder-glow"));
        assert!(!html.contains("<input"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_submitting_disables_inputs() {
        let mut form = form();
        form.set_submitting(true);
        let html = render_form(&form);

        assert!(html.contains("spinner-border"));
        assert!(html.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_form_wraps_grid_and_actions() {
        let html = render_form(&form());

        assert!(html.starts_with("<form"));
        assert!(html.contains(r#"novalidate="novalidate""#));
        let grid = html.find("row g-3").unwrap();
        let actions = html.find("justify-content-end").unwrap();
        let end = html.find("</form>").unwrap();
        assert!(grid < actions && actions < end);
        assert!(html[actions..].contains("<button"));
    }
}
