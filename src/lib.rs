//! # chartjs_schema
//!
//! A typed configuration schema for Chart.js charts.
//!
//! Build a chart from validated Rust types, then serialize it to the JSON
//! configuration object Chart.js expects. Output is pruned: fields holding
//! their default value are left out, and keys are emitted in camelCase.
//!
//! ## Key Features
//!
//! - **Eager validation**: colors, enumeration tags, list elements and dataset
//!   shapes are checked when an entity is built, never at render time
//! - **Compact output**: default-valued fields are pruned, or keep only the
//!   fields you set explicitly with [`Exclude::Unset`]
//! - **Dynamic input**: any entity can be read from a [`Value`] or JSON text,
//!   accepting both `snake_case` and `camelCase` keys
//! - **Serde compatible**: every entity implements `Serialize` and
//!   `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use chartjs_schema::{
//!     to_string, Chart, ChartType, Color, Data, Dataset, Legend, Options, Plugins, Position,
//! };
//!
//! let energy = Dataset::line(vec![3, 4, 2])
//!     .with_label("Energy")
//!     .with_border_color(Color::parse("rgb(54, 162, 235)").unwrap());
//!
//! let mut plugins = Plugins::new();
//! plugins.insert("legend", Legend::new().with_position(Position::Bottom));
//!
//! let chart = Chart::new(Data::new(vec![energy]))
//!     .with_chart_type(ChartType::Line)
//!     .with_options(Options::new(plugins));
//!
//! let json = to_string(&chart).unwrap();
//! assert!(json.starts_with(r#"{"type":"line","data":{"datasets":[{"label":"Energy""#));
//! assert!(json.contains(r##""borderColor":"#36a2eb""##));
//! ```
//!
//! ### Reading Dynamic Input
//!
//! ```rust
//! use chartjs_schema::{from_str, Chart, ChartType};
//!
//! let chart: Chart = from_str(r#"{
//!     "type": "polarArea",
//!     "data": {"datasets": [{"data": [[0, 1.5], [1, null]], "border_color": "teal"}]}
//! }"#)
//! .unwrap();
//!
//! assert_eq!(chart.chart_type(), ChartType::PolarArea);
//! assert_eq!(chart.datasets()[0].data().shape_name(), "indexed");
//! ```
//!
//! ### Literal Values with the value! Macro
//!
//! ```rust
//! use chartjs_schema::{from_value, value, Legend, Position};
//!
//! let legend: Legend = from_value(&value!({ "position": "left", "fullWidth": false })).unwrap();
//! assert_eq!(legend.position(), Position::Left);
//! assert!(!legend.full_width());
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events at `debug` and `trace` level while reading
//! dynamic input. It never installs a subscriber.
//!
//! ## Demos
//!
//! - **`line_chart.rs`** - A two-series line chart with legend and title
//! - **`dynamic_input.rs`** - Validating JSON input and reporting errors
//!
//! Run one with: `cargo run --example <name>`

#[macro_use]
mod macros;

pub mod chart;
pub mod color;
pub mod dataset;
pub mod enums;
pub mod error;
pub mod list;
pub mod map;
pub mod model;
pub mod options;
pub mod plugins;
pub mod ser;
pub mod value;

pub use chart::{Chart, Data, Defaults, Layout, Options, ResizeCallback};
pub use color::Color;
pub use dataset::{Dataset, DatasetData, Point, XValue};
pub use enums::{ChartType, Position};
pub use error::{Error, Result};
pub use list::List;
pub use map::Map;
pub use model::{FromValue, Model, ToValue};
pub use options::{Exclude, SerializeOptions};
pub use plugins::{Legend, LegendLabel, Plugin, Plugins, Title};
pub use ser::{dump, ValueSerializer};
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Serializes an entity into a pruned [`Value`] using the default options.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::{serialize, value, LegendLabel};
///
/// assert_eq!(serialize(&LegendLabel::new()).unwrap(), value!({}));
/// ```
///
/// # Errors
///
/// Fails only on a defective field table ([`Error::UnsupportedFieldType`]).
pub fn serialize<T>(entity: &T) -> Result<Value>
where
    T: ?Sized + ToValue,
{
    serialize_with_options(entity, &SerializeOptions::default())
}

/// Serializes an entity into a [`Value`] with the given exclusion policy.
///
/// # Errors
///
/// Fails only on a defective field table ([`Error::UnsupportedFieldType`]).
pub fn serialize_with_options<T>(entity: &T, options: &SerializeOptions) -> Result<Value>
where
    T: ?Sized + ToValue,
{
    entity.to_value(options)
}

/// Serializes an entity to compact JSON text.
///
/// # Errors
///
/// Returns an error if the entity cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(entity: &T) -> Result<String>
where
    T: ?Sized + ToValue,
{
    to_string_with_options(entity, &SerializeOptions::default())
}

/// Serializes an entity to indented JSON text.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::{to_string_pretty, Layout};
///
/// let json = to_string_pretty(&Layout::new().with_padding(8)).unwrap();
/// assert_eq!(json, "{\n  \"padding\": 8\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the entity cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(entity: &T) -> Result<String>
where
    T: ?Sized + ToValue,
{
    to_string_with_options(entity, &SerializeOptions::pretty())
}

/// Serializes an entity to JSON text with custom options.
///
/// # Errors
///
/// Returns an error if the entity cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(entity: &T, options: &SerializeOptions) -> Result<String>
where
    T: ?Sized + ToValue,
{
    let mut out = Vec::with_capacity(128);
    to_writer_with_options(&mut out, entity, options)?;
    String::from_utf8(out).map_err(|e| Error::custom(e.utf8_error()))
}

/// Serializes an entity as compact JSON into an IO stream.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer fails.
pub fn to_writer<W, T>(writer: W, entity: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + ToValue,
{
    to_writer_with_options(writer, entity, &SerializeOptions::default())
}

/// Serializes an entity as JSON into an IO stream with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer fails.
pub fn to_writer_with_options<W, T>(writer: W, entity: &T, options: &SerializeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + ToValue,
{
    let value = entity.to_value(options)?;
    ser::write_json(writer, &value, options)
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Reading { day: String, level: u8 }
///
/// let value = to_value(&Reading { day: "Mon".to_string(), level: 3 }).unwrap();
/// assert_eq!(value.get("level").and_then(Value::as_i64), Some(3));
/// ```
///
/// # Errors
///
/// Returns an error if `T`'s `Serialize` implementation fails.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Builds and validates an entity from a [`Value`].
///
/// Keys may be given in `snake_case` or `camelCase`.
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn from_value<T: FromValue>(value: &Value) -> Result<T> {
    T::from_value(value)
}

/// Parses JSON text and builds an entity from it.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed text, otherwise the first validation
/// error.
pub fn from_str<T: FromValue>(s: &str) -> Result<T> {
    let value: Value = serde_json::from_str(s)?;
    T::from_value(&value)
}

/// Parses JSON bytes and builds an entity from them.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed input, otherwise the first
/// validation error.
pub fn from_slice<T: FromValue>(v: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(v)?;
    T::from_value(&value)
}
