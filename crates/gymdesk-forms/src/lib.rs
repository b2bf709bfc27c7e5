//! # gymdesk-forms
//!
//! Metadata-driven create/edit forms for the gymdesk administration screens.
//!
//! This crate provides:
//! - Field descriptors with a closed set of kinds and validators
//! - A form engine tracking values, dirty/touched flags and errors
//! - Payload normalization (dates submitted as `YYYY-MM-DD`)
//! - Bootstrap 5 rendering
//! - JSON field schemas
//! - A create/edit screen that talks to a record backend
//!
//! ## Quick Start
//!
//! ```rust
//! use gymdesk_forms::{DynamicForm, FormEvent};
//! use gymdesk_forms::fields::{date_field, text_field};
//! use serde_json::json;
//!
//! let fields = vec![
//!     text_field("name", "Name", 80, true),
//!     date_field("dob", "Date of birth", false),
//! ];
//! let mut form = DynamicForm::new(fields, None);
//!
//! // Pristine fields are never shown as invalid.
//! assert!(!form.is_invalid("name"));
//!
//! form.set_value("name", "Alice").unwrap();
//! form.set_input("dob", "2024-03-15T10:30:00").unwrap();
//!
//! let Some(FormEvent::Submit(payload)) = form.on_submit() else {
//!     panic!("form should be valid");
//! };
//! assert_eq!(payload["name"], json!("Alice"));
//! assert_eq!(payload["dob"], json!("2024-03-15"));
//! ```
//!
//! ## Edit mode
//!
//! Initialization is one-shot. When the record arrives after the form was
//! built, pass it to [`DynamicForm::reinitialize`]:
//!
//! ```rust
//! use gymdesk_forms::{DynamicForm, Record};
//! use gymdesk_forms::fields::text_field;
//! use serde_json::json;
//!
//! let mut form = DynamicForm::new(vec![text_field("name", "Name", 80, true)], None);
//! let record: Record = serde_json::from_value(json!({"id": 3, "name": "Bob"})).unwrap();
//! form.reinitialize(Some(&record));
//! assert_eq!(form.value("name").and_then(|v| v.as_str()), Some("Bob"));
//! ```
//!
//! ## Schemas
//!
//! ```rust
//! use gymdesk_forms::{parse_fields, render_form, DynamicForm};
//!
//! let fields = parse_fields(r#"[
//!     {"name": "email", "label": "Email", "kind": "email",
//!      "rules": [{"type": "required"}, {"type": "email"}]}
//! ]"#).unwrap();
//! let html = render_form(&DynamicForm::new(fields, None));
//! assert!(html.contains(r#"type="email""#));
//! ```

mod error;
pub mod fields;
mod form;
pub mod render;
pub mod schema;
pub mod screen;
pub mod state;
pub mod validation;
pub mod value;
pub mod widgets;

pub use error::{BackendError, FormError, Result, ValidationErrors};
pub use fields::{FieldDescriptor, FieldKind, LayoutSpan, SelectOption};
pub use form::{DynamicForm, FormEvent, FormOptions, Payload, Record, DEFAULT_SUBMIT_LABEL};
pub use render::{render_field, render_form};
pub use schema::{parse_fields, FieldSpec};
pub use state::{FieldStatus, FormState};
pub use value::{DateValue, FieldValue};
