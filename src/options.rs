//! Configuration options for chart serialization.
//!
//! - [`SerializeOptions`]: main configuration struct
//! - [`Exclude`]: which fields are pruned from the output
//!
//! ## Examples
//!
//! ```rust
//! use chartjs_schema::{serialize_with_options, Exclude, SerializeOptions, Title};
//!
//! let title = Title::new().with_padding(10);
//!
//! // Default policy drops values equal to their default, even when set explicitly
//! let pruned = serialize_with_options(&title, &SerializeOptions::new()).unwrap();
//! assert!(pruned.as_object().unwrap().is_empty());
//!
//! // Explicit-set policy keeps anything the caller assigned
//! let options = SerializeOptions::new().with_exclude(Exclude::Unset);
//! let kept = serialize_with_options(&title, &options).unwrap();
//! assert_eq!(kept.get("padding").and_then(|v| v.as_i64()), Some(10));
//! ```

/// Field exclusion policy applied while serializing a model.
///
/// Optional fields holding no value and fields without a wire
/// representation (callbacks) are omitted under every policy.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::Exclude;
///
/// assert_eq!(Exclude::default(), Exclude::Defaults);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Exclude {
    /// Omit fields whose value equals the declared default.
    #[default]
    Defaults,
    /// Omit fields that were never explicitly assigned.
    Unset,
    /// Emit every field.
    Nothing,
}

/// Configuration options for serialization and JSON text output.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::{Exclude, SerializeOptions};
///
/// let options = SerializeOptions::new();
/// assert_eq!(options.exclude, Exclude::Defaults);
/// assert!(!options.pretty);
///
/// let options = SerializeOptions::pretty().with_indent(4);
/// assert_eq!(options.indent, 4);
///
/// let options = SerializeOptions::all_fields();
/// assert_eq!(options.exclude, Exclude::Nothing);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SerializeOptions {
    pub exclude: Exclude,
    pub pretty: bool,
    pub indent: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            exclude: Exclude::default(),
            pretty: false,
            indent: 2,
        }
    }
}

impl SerializeOptions {
    /// Creates default options (prune defaults, compact text, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented JSON text.
    #[must_use]
    pub fn pretty() -> Self {
        SerializeOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Creates options that force every field into the output.
    ///
    /// The result can be read back with `from_value` into an equal model.
    #[must_use]
    pub fn all_fields() -> Self {
        SerializeOptions {
            exclude: Exclude::Nothing,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_exclude(mut self, exclude: Exclude) -> Self {
        self.exclude = exclude;
        self
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
