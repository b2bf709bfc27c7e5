//! Field validators.
//!
//! Validators see the typed [`FieldValue`]. Apart from the required
//! validators, every validator accepts empty values so optional fields can be
//! left blank.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &FieldValue) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// Returns whether this validator makes the field required.
    fn is_required(&self) -> bool {
        false
    }
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Validator that requires a checked box, e.g. accepting terms.
#[derive(Debug, Clone)]
pub struct RequiredTrueValidator {
    message: String,
}

impl RequiredTrueValidator {
    /// Creates a new RequiredTrueValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This box must be checked.".to_string(),
        }
    }
}

impl Default for RequiredTrueValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredTrueValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value {
            FieldValue::Bool(true) => Ok(()),
            _ => Err(self.message.clone()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Length of text (in characters) or of a list. Other values have none.
fn value_len(value: &FieldValue) -> Option<usize> {
    match value {
        FieldValue::Text(s) => Some(s.chars().count()),
        FieldValue::Other(serde_json::Value::Array(items)) => Some(items.len()),
        _ => None,
    }
}

/// Validator that enforces a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value_len(value) {
            Some(len) if len > self.max_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        match value_len(value) {
            Some(len) if len < self.min_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        match value.as_str() {
            Some(s) if email_regex().is_match(s.trim()) => Ok(()),
            _ => Err(self.message.clone()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for URL values.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid URL.".to_string(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        match value.as_str() {
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => Ok(()),
            _ => Err(self.message.clone()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern.
///
/// The pattern must match the whole value.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator. The pattern is anchored on both ends.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        let text = match value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            _ => return Err(self.message.clone()),
        };
        if self.pattern.is_match(&text) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        let num = value
            .as_f64()
            .ok_or_else(|| "Enter a valid number.".to_string())?;

        if self.min.is_some_and(|min| num < min) || self.max.is_some_and(|max| num > max) {
            return Err(self.message.clone());
        }

        Ok(())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Serializable description of a built-in validator.
///
/// Field schemas loaded from JSON list their rules this way, e.g.
/// `{"type": "max_length", "value": 120}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    Required,
    RequiredTrue,
    MinLength { value: usize },
    MaxLength { value: usize },
    Min { value: f64 },
    Max { value: f64 },
    Email,
    Url,
    Pattern {
        value: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl Rule {
    /// Builds the validator described by this rule.
    pub fn build(&self) -> Result<Arc<dyn Validator>, regex::Error> {
        let validator: Arc<dyn Validator> = match self {
            Self::Required => Arc::new(RequiredValidator::new()),
            Self::RequiredTrue => Arc::new(RequiredTrueValidator::new()),
            Self::MinLength { value } => Arc::new(MinLengthValidator::new(*value)),
            Self::MaxLength { value } => Arc::new(MaxLengthValidator::new(*value)),
            Self::Min { value } => Arc::new(RangeValidator::new(Some(*value), None)),
            Self::Max { value } => Arc::new(RangeValidator::new(None, Some(*value))),
            Self::Email => Arc::new(EmailValidator::new()),
            Self::Url => Arc::new(UrlValidator::new()),
            Self::Pattern { value, message } => Arc::new(RegexValidator::new(
                value,
                message
                    .clone()
                    .unwrap_or_else(|| "Enter a valid value.".to_string()),
            )?),
        };
        Ok(validator)
    }
}
