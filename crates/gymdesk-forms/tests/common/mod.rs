#![allow(dead_code)]

use gymdesk_forms::{DynamicForm, FieldDescriptor, FormEvent, Payload, Record};
use serde_json::Value;

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {other:?}"),
    }
}

pub fn form(fields: Vec<FieldDescriptor>) -> DynamicForm {
    DynamicForm::new(fields, None)
}

pub fn form_with(fields: Vec<FieldDescriptor>, initial: Value) -> DynamicForm {
    DynamicForm::new(fields, Some(&record(initial)))
}

pub fn submit(form: &mut DynamicForm) -> Payload {
    match form.on_submit() {
        Some(FormEvent::Submit(payload)) => payload,
        other => panic!("Expected a submit event, got {other:?}\n{}", form.validation_errors()),
    }
}

pub fn submit_blocked(form: &mut DynamicForm) {
    if let Some(event) = form.on_submit() {
        panic!("Expected submission to be blocked, got {event:?}");
    }
}
