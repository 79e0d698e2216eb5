//! Error types for chart schema construction and serialization.
//!
//! Every entity is validated eagerly when it is built, so almost all errors
//! surface at construction time:
//!
//! - **Color errors**: a string or tuple that is not a recognizable color
//! - **Enumeration errors**: a chart type or position tag that does not exist
//! - **Container errors**: a list element that fails coercion (with its index)
//! - **Field errors**: a required field is missing, or a scalar has the wrong type
//! - **Plugin errors**: a plugin entry that is neither a legend nor a title
//!
//! Serialization of a validly constructed tree does not fail under normal use.
//! [`Error::UnsupportedFieldType`] indicates a defect in a model's field table,
//! not bad user input.
//!
//! ## Examples
//!
//! ```rust
//! use chartjs_schema::{Color, Error};
//!
//! let err = Color::parse("not-a-color").unwrap_err();
//! assert!(matches!(err, Error::InvalidColor { .. }));
//! assert!(err.to_string().contains("not-a-color"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while building or serializing a chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not a hex, named, `rgb()`/`rgba()` or tuple color
    #[error("Invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },

    /// A tag that is not part of a closed enumeration
    #[error("Unknown {kind} value {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },

    /// A container element failed validation; `location` is an index or a key
    #[error("Invalid element at {location}: {reason}")]
    ElementValidation { location: String, reason: String },

    /// A field with no default was not supplied
    #[error("{model}: required field '{field}' is missing")]
    RequiredFieldMissing {
        model: &'static str,
        field: &'static str,
    },

    /// A plugin entry whose value is neither a legend nor a title
    #[error("Plugin '{key}' must be a legend or a title, found {found}")]
    InvalidPluginValue { key: String, found: String },

    /// A scalar value could not be coerced to the field's type
    #[error("Invalid value{}: expected {expected}, found {found}", field_suffix(.field))]
    SchemaValidation {
        field: Option<String>,
        expected: String,
        found: String,
    },

    /// A field table names a field the model cannot produce
    #[error("Unsupported field {field:?} on {model}")]
    UnsupportedFieldType { model: &'static str, field: String },

    /// JSON text could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|f| format!(" for field '{}'", f))
        .unwrap_or_default()
}

impl Error {
    /// Creates an invalid color error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::Error;
    ///
    /// let err = Error::invalid_color("#12", "hex colors need 3, 4, 6 or 8 digits");
    /// assert!(err.to_string().contains("#12"));
    /// ```
    pub fn invalid_color(input: &str, reason: &str) -> Self {
        Error::InvalidColor {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an unknown enumeration value error.
    pub fn unknown_enum_value(kind: &'static str, value: &str) -> Self {
        Error::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }

    /// Creates a container element error for the element at `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::Error;
    ///
    /// let err = Error::element_at(3, "expected number, found string");
    /// assert!(err.to_string().contains("index 3"));
    /// ```
    pub fn element_at(index: usize, reason: impl fmt::Display) -> Self {
        Error::ElementValidation {
            location: format!("index {}", index),
            reason: reason.to_string(),
        }
    }

    /// Creates a container element error for the entry under `key`.
    pub fn element_for_key(key: &str, reason: impl fmt::Display) -> Self {
        Error::ElementValidation {
            location: format!("key {:?}", key),
            reason: reason.to_string(),
        }
    }

    /// Creates a missing required field error.
    pub fn required_field_missing(model: &'static str, field: &'static str) -> Self {
        Error::RequiredFieldMissing { model, field }
    }

    /// Creates an invalid plugin value error.
    pub fn invalid_plugin_value(key: &str, found: &str) -> Self {
        Error::InvalidPluginValue {
            key: key.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a type coercion error that is not yet attached to a field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::Error;
    ///
    /// let err = Error::schema("integer", "string").with_field("padding");
    /// assert!(err.to_string().contains("field 'padding'"));
    /// ```
    pub fn schema(expected: &str, found: &str) -> Self {
        Error::SchemaValidation {
            field: None,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported field error, raised when a field table and a
    /// model's accessors disagree.
    pub fn unsupported_field(model: &'static str, field: &str) -> Self {
        Error::UnsupportedFieldType {
            model,
            field: field.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attaches a field name to a schema or element error.
    ///
    /// Nested errors keep their innermost field, so the first attachment wins.
    #[must_use]
    pub fn with_field(self, name: &str) -> Self {
        match self {
            Error::SchemaValidation {
                field: None,
                expected,
                found,
            } => Error::SchemaValidation {
                field: Some(name.to_string()),
                expected,
                found,
            },
            Error::ElementValidation { location, reason } if !location.contains(" in ") => {
                Error::ElementValidation {
                    location: format!("{} in '{}'", location, name),
                    reason,
                }
            }
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::io(&err.to_string());
        }
        Error::Json(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
