//! Loading field lists from JSON and driving them through the engine.

mod common;
use common::*;

use gymdesk_forms::{parse_fields, render_form, DynamicForm, FieldKind, FormError, LayoutSpan};
use serde_json::json;

const SUBSCRIPTION_SCHEMA: &str = r#"[
    {"name": "member_id", "label": "Member", "kind": "select",
     "options": [{"label": "Ana Pérez", "value": 12}, {"label": "Luis Gómez", "value": 13}],
     "rules": [{"type": "required"}]},
    {"name": "start_date", "label": "Start date", "kind": "date",
     "rules": [{"type": "required"}]},
    {"name": "sessions", "label": "Sessions", "kind": "number",
     "rules": [{"type": "min", "value": 1}, {"type": "max", "value": 30}], "default": 8},
    {"name": "auto_renew", "label": "Auto renew", "kind": "switch", "default": true},
    {"name": "notes", "label": "Notes", "kind": "textarea", "span": 2, "placeholder": "Optional"}
]"#;

#[test]
fn schema_builds_expected_descriptors() {
    let fields = parse_fields(SUBSCRIPTION_SCHEMA).unwrap();

    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0].options().len(), 2);
    assert!(fields[0].required);
    assert_eq!(fields[4].kind, FieldKind::Textarea { rows: 3 });
    assert_eq!(fields[4].span, LayoutSpan::Double);
    assert_eq!(fields[2].default_value, Some(json!(8)));
}

#[test]
fn schema_form_submits_normalized_payload() {
    let mut form = DynamicForm::new(parse_fields(SUBSCRIPTION_SCHEMA).unwrap(), None);

    form.set_input("member_id", "13").unwrap();
    form.set_input("start_date", "2024-09-01").unwrap();

    assert_eq!(
        submit(&mut form),
        record(json!({
            "member_id": 13,
            "start_date": "2024-09-01",
            "sessions": 8,
            "auto_renew": true,
            "notes": null
        }))
    );
}

#[test]
fn schema_range_rules_apply() {
    let mut form = DynamicForm::new(parse_fields(SUBSCRIPTION_SCHEMA).unwrap(), None);
    form.set_input("sessions", "45").unwrap();

    assert!(form.is_invalid("sessions"));
    assert_eq!(form.errors("sessions"), ["Value must be at most 30."]);
}

#[test]
fn duplicate_names_are_rejected() {
    let err = parse_fields(
        r#"[{"name": "email", "label": "Email", "kind": "email"},
            {"name": "email", "label": "Email again", "kind": "text"}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, FormError::DuplicateField(name) if name == "email"));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = parse_fields(r#"[{"name": "photo", "label": "Photo", "kind": "file"}]"#).unwrap_err();
    assert!(matches!(err, FormError::Schema(_)));
}

#[test]
fn schema_form_renders() {
    let form = DynamicForm::new(parse_fields(SUBSCRIPTION_SCHEMA).unwrap(), None);
    let html = render_form(&form);

    assert!(html.contains(r#"<option value="12">Ana Pérez</option>"#));
    assert!(html.contains(r#"type="date""#));
    assert!(html.contains(r#"placeholder="Optional""#));
    assert!(html.contains("Start date *"));
}
