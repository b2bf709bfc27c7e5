//! Field values and date coercion.
//!
//! Records coming from the backend are plain JSON objects. Inside a form each
//! value is held as a [`FieldValue`], which keeps dates as parsed
//! [`DateValue`]s so they can be truncated to a calendar date on submission.
//!
//! Date handling never converts to UTC: a timestamp carrying an offset keeps
//! the wall-clock components written in that offset, and the calendar date is
//! taken from those components.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Number, Value};

use crate::fields::FieldKind;

/// Wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format used for date values held by non-date fields.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed date, or the sentinel for input that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// Wall-clock date and time.
    Valid(NaiveDateTime),
    /// Unparseable input, kept verbatim.
    Invalid(String),
}

impl DateValue {
    /// Parses a JSON value into a date.
    ///
    /// Strings may be RFC 3339 timestamps, naive date-times or plain
    /// `YYYY-MM-DD` dates. Numbers are milliseconds since the Unix epoch.
    /// Anything else yields [`DateValue::Invalid`].
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse_str(s),
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64));
                millis
                    .and_then(DateTime::from_timestamp_millis)
                    .map_or_else(|| Self::Invalid(n.to_string()), |dt| Self::Valid(dt.naive_utc()))
            }
            other => Self::Invalid(other.to_string()),
        }
    }

    /// Parses a date string. See [`DateValue::parse`].
    pub fn parse_str(input: &str) -> Self {
        let s = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Self::Valid(dt.naive_local());
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Self::Valid(dt);
            }
        }

        match NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(date) => Self::Valid(date.and_time(NaiveTime::MIN)),
            Err(_) => Self::Invalid(input.to_string()),
        }
    }

    /// Returns the calendar date, if valid.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(dt) => Some(dt.date()),
            Self::Invalid(_) => None,
        }
    }

    /// Returns whether this is a parsed date.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// The current value of one form field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// Checkbox or switch state.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Free text.
    Text(String),
    /// Date value, only produced for date fields by the engine.
    Date(DateValue),
    /// Arrays and objects, passed through untouched.
    Other(Value),
}

impl FieldValue {
    /// Converts a JSON value into a field value for a field of `kind`.
    ///
    /// Non-null values of date fields are parsed into [`DateValue`]s.
    pub fn from_json(kind: &FieldKind, value: Value) -> Self {
        match (kind, value) {
            (_, Value::Null) => Self::Null,
            (FieldKind::Date, value) => Self::Date(DateValue::parse(&value)),
            (_, Value::Bool(b)) => Self::Bool(b),
            (_, Value::Number(n)) => Self::Number(n),
            (_, Value::String(s)) => Self::Text(s),
            (_, other) => Self::Other(other),
        }
    }

    /// Normalizes a value written into a field of `kind` the same way
    /// [`FieldValue::from_json`] does on initialization: text and numbers
    /// written into a date field are parsed, blank text becomes null.
    #[must_use]
    pub fn for_kind(self, kind: &FieldKind) -> Self {
        match (kind, self) {
            (FieldKind::Date, Self::Text(s)) if s.trim().is_empty() => Self::Null,
            (FieldKind::Date, Self::Text(s)) => Self::Date(DateValue::parse_str(&s)),
            (FieldKind::Date, Self::Number(n)) => Self::Date(DateValue::parse(&Value::Number(n))),
            (_, value) => value,
        }
    }

    /// Converts this value to JSON.
    ///
    /// Valid dates become `YYYY-MM-DDTHH:MM:SS.fff`; invalid dates become
    /// `null`. Date fields truncate to the calendar date separately, see
    /// [`FieldValue::to_date_json`].
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null | Self::Date(DateValue::Invalid(_)) => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
            Self::Date(DateValue::Valid(dt)) => {
                Value::String(dt.format(DATETIME_FORMAT).to_string())
            }
            Self::Other(v) => v.clone(),
        }
    }

    /// Converts this value to JSON, truncating dates to `YYYY-MM-DD`.
    ///
    /// Time of day is discarded.
    pub fn to_date_json(&self) -> Value {
        match self {
            Self::Date(DateValue::Valid(dt)) => {
                Value::String(dt.date().format(DATE_FORMAT).to_string())
            }
            other => other.to_json(),
        }
    }

    /// Returns the string shown inside an input widget, if any.
    pub fn to_input_string(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(DateValue::Valid(dt)) => Some(dt.date().format(DATE_FORMAT).to_string()),
            Self::Date(DateValue::Invalid(raw)) => Some(raw.clone()),
            Self::Other(v) => Some(v.to_string()),
        }
    }

    /// Returns whether the value counts as empty for validation.
    ///
    /// Null, whitespace-only text, empty arrays and unparseable dates are
    /// empty. `false` and `0` are values.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null | Self::Date(DateValue::Invalid(_)) => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Other(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the value as a finite float, parsing numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Returns the text content, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date, if this is a date value.
    pub fn as_date(&self) -> Option<&DateValue> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(DateValue::Valid(value.and_time(NaiveTime::MIN)))
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(DateValue::Valid(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
