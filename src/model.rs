//! Field tables and the generic model machinery.
//!
//! Every entity declares a static table of [`FieldSpec`]s: the snake_case
//! name, the camelCase wire alias, the default, and whether the field has a
//! wire representation at all. Two generic routines interpret the table:
//!
//! - [`construct`] reads a [`Value`] object through a [`FieldInput`], which
//!   accepts either spelling of each key and records which fields were given.
//! - [`dump`](crate::dump) walks the table to emit pruned, aliased output.
//!
//! Per-field coercion goes through [`FromValue`]; per-field output through
//! [`ToValue`].

use crate::value::describe;
use crate::{Error, Map, Number, Result, SerializeOptions, Value};
use indexmap::IndexSet;
use std::marker::PhantomData;
use tracing::debug;

/// Declared default of a field.
///
/// Defaults are stored in their serialized form so that the value-equality
/// exclusion policy can compare them against a field's output directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldDefault {
    /// No default; construction fails without a value.
    Required,
    /// Optional field, absent by default.
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A string, a color's canonical form, or an enumeration's wire value.
    Str(&'static str),
    EmptyList,
}

impl FieldDefault {
    /// The serialized default, or `None` for required and absent fields.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            FieldDefault::Required | FieldDefault::Absent => None,
            FieldDefault::Bool(b) => Some(Value::Bool(*b)),
            FieldDefault::Int(i) => Some(Value::Number(Number::Integer(*i))),
            FieldDefault::Float(f) => Some(Value::Number(Number::Float(*f))),
            FieldDefault::Str(s) => Some(Value::from(*s)),
            FieldDefault::EmptyList => Some(Value::Array(Vec::new())),
        }
    }
}

/// One row of a model's field table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub default: FieldDefault,
    pub serializable: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str, alias: &'static str) -> Self {
        FieldSpec {
            name,
            alias,
            default: FieldDefault::Required,
            serializable: true,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, alias: &'static str) -> Self {
        FieldSpec {
            name,
            alias,
            default: FieldDefault::Absent,
            serializable: true,
        }
    }

    #[must_use]
    pub const fn with_default(
        name: &'static str,
        alias: &'static str,
        default: FieldDefault,
    ) -> Self {
        FieldSpec {
            name,
            alias,
            default,
            serializable: true,
        }
    }

    /// Marks the field as having no wire representation.
    #[must_use]
    pub const fn skip_serializing(mut self) -> Self {
        self.serializable = false;
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default == FieldDefault::Required
    }
}

/// Names of the fields that were explicitly assigned on a model instance.
///
/// Set-tracking is metadata about how an instance was built. It does not take
/// part in equality: two models with the same field values compare equal.
#[derive(Clone, Debug, Default)]
pub struct FieldsSet(IndexSet<&'static str>);

impl FieldsSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, name: &'static str) {
        self.0.insert(name);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in the order they were assigned.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl PartialEq for FieldsSet {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Conversion of a field value into its wire [`Value`].
pub trait ToValue {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value>;
}

/// Validating conversion of a [`Value`] into a field type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

/// An entity described by a static field table.
pub trait Model: Sized {
    /// Entity name used in error messages.
    const NAME: &'static str;

    /// Fields in declaration order; output follows this order.
    const FIELDS: &'static [FieldSpec];

    fn fields_set(&self) -> &FieldsSet;

    /// The wire value of the field called `name` (snake_case).
    ///
    /// Returns `Ok(None)` when an optional field holds no value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFieldType`] for a name the model does not
    /// serialize.
    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>>;

    /// Builds the model from resolved input fields.
    ///
    /// # Errors
    ///
    /// Returns the first validation error among the fields.
    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self>;

    /// Looks up a field by snake_case name or camelCase alias.
    #[must_use]
    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS
            .iter()
            .find(|f| f.name == name || f.alias == name)
    }
}

/// Builds a model from a [`Value`] object.
///
/// # Errors
///
/// Fails if `value` is not an object or any field fails validation.
pub fn construct<M: Model>(value: &Value) -> Result<M> {
    let mut input = FieldInput::<M>::new(value)?;
    M::from_input(&mut input)
}

/// Resolves input keys against a model's field table.
///
/// Each field is looked up under its snake_case name and its camelCase alias.
/// Supplying both spellings is accepted only when they hold the same value.
pub struct FieldInput<'a, M> {
    object: &'a Map,
    fields_set: FieldsSet,
    _model: PhantomData<M>,
}

impl<'a, M: Model> FieldInput<'a, M> {
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] if `value` is not an object.
    pub fn new(value: &'a Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| Error::SchemaValidation {
            field: None,
            expected: format!("{} object", M::NAME),
            found: describe(value),
        })?;
        Ok(FieldInput {
            object,
            fields_set: FieldsSet::new(),
            _model: PhantomData,
        })
    }

    fn lookup(&mut self, name: &str) -> Result<(&'static FieldSpec, Option<&'a Value>)> {
        let spec = M::field(name).ok_or_else(|| Error::unsupported_field(M::NAME, name))?;
        let object = self.object;
        let snake = object.get(spec.name);
        let camel = if spec.alias == spec.name {
            None
        } else {
            object.get(spec.alias)
        };
        let value = match (snake, camel) {
            (Some(a), Some(b)) if a != b => {
                return Err(Error::SchemaValidation {
                    field: Some(spec.alias.to_string()),
                    expected: format!("one value for '{}' or '{}'", spec.name, spec.alias),
                    found: "conflicting values".to_string(),
                })
            }
            (Some(v), _) | (None, Some(v)) => v,
            (None, None) => return Ok((spec, None)),
        };
        self.fields_set.mark(spec.name);
        Ok((spec, Some(value)))
    }

    /// Reads a field that has no default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequiredFieldMissing`] when absent, or the coercion
    /// error of `T`.
    pub fn required<T: FromValue>(&mut self, name: &str) -> Result<T> {
        match self.lookup(name)? {
            (spec, Some(value)) => T::from_value(value).map_err(|e| e.with_field(spec.alias)),
            (spec, None) => Err(Error::required_field_missing(M::NAME, spec.name)),
        }
    }

    /// Reads an optional field; a missing key or `null` yields `None`.
    ///
    /// # Errors
    ///
    /// Returns the coercion error of `T`.
    pub fn optional<T: FromValue>(&mut self, name: &str) -> Result<Option<T>> {
        match self.lookup(name)? {
            (_, None | Some(Value::Null)) => Ok(None),
            (spec, Some(value)) => T::from_value(value)
                .map(Some)
                .map_err(|e| e.with_field(spec.alias)),
        }
    }

    /// Reads a field, falling back to `default` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns the coercion error of `T`.
    pub fn or_default<T: FromValue>(&mut self, name: &str, default: T) -> Result<T> {
        match self.lookup(name)? {
            (spec, Some(value)) => T::from_value(value).map_err(|e| e.with_field(spec.alias)),
            (_, None) => Ok(default),
        }
    }

    /// Accepts and drops a field without a wire representation.
    pub fn ignore(&mut self, name: &str) {
        if let Some(spec) = M::field(name) {
            if self.object.contains_key(spec.name) || self.object.contains_key(spec.alias) {
                debug!(
                    model = M::NAME,
                    field = spec.name,
                    "dropping input for non-serializable field"
                );
            }
        }
    }

    /// Finishes construction, returning the fields that were supplied.
    ///
    /// Keys that match no field are ignored.
    pub fn finish(&mut self) -> FieldsSet {
        for key in self.object.keys() {
            if M::field(key).is_none() {
                debug!(model = M::NAME, key = key.as_str(), "ignoring unknown key");
            }
        }
        std::mem::take(&mut self.fields_set)
    }
}

/// Converts a snake_case identifier to camelCase.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::model::to_camel_case;
///
/// assert_eq!(to_camel_case("maintain_aspect_ratio"), "maintainAspectRatio");
/// assert_eq!(to_camel_case("padding"), "padding");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl ToValue for bool {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl ToValue for i64 {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        Ok(Value::Number(Number::Integer(*self)))
    }
}

impl ToValue for f64 {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        Number::Float(*self).to_value(options)
    }
}

/// JSON has no spelling for NaN or infinity, so those fail here instead of
/// being written as `null`.
impl ToValue for Number {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        match self {
            Number::Float(f) if !f.is_finite() => {
                Err(Error::schema("finite number", &f.to_string()))
            }
            n => Ok(Value::Number(*n)),
        }
    }
}

impl ToValue for String {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl ToValue for Map {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        Ok(Value::Object(self.clone()))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::schema("boolean", &describe(value)))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::schema("integer", &describe(value)))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::schema("number", &describe(value)))
    }
}

impl FromValue for Number {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_number()
            .ok_or_else(|| Error::schema("number", &describe(value)))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::schema("string", &describe(value)))
    }
}

impl FromValue for Map {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| Error::schema("object", &describe(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        size: i64,
        name: Option<String>,
        fields_set: FieldsSet,
    }

    impl Model for Probe {
        const NAME: &'static str = "Probe";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::with_default("box_size", "boxSize", FieldDefault::Int(1)),
            FieldSpec::optional("name", "name"),
        ];

        fn fields_set(&self) -> &FieldsSet {
            &self.fields_set
        }

        fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
            match name {
                "box_size" => self.size.to_value(options).map(Some),
                "name" => crate::ser::optional(self.name.as_ref(), options),
                other => Err(Error::unsupported_field(Self::NAME, other)),
            }
        }

        fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
            Ok(Probe {
                size: input.or_default("box_size", 1)?,
                name: input.optional("name")?,
                fields_set: input.finish(),
            })
        }
    }

    fn object(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_both_spellings_resolve() {
        let probe: Probe = construct(&object(&[("box_size", Value::from(3))])).unwrap();
        assert_eq!(probe.size, 3);
        let probe: Probe = construct(&object(&[("boxSize", Value::from(4))])).unwrap();
        assert_eq!(probe.size, 4);
        assert!(probe.fields_set.contains("box_size"));
        assert!(!probe.fields_set.contains("name"));
    }

    #[test]
    fn test_duplicate_spellings() {
        let same = object(&[("box_size", Value::from(3)), ("boxSize", Value::from(3))]);
        assert_eq!(construct::<Probe>(&same).unwrap().size, 3);

        let conflicting = object(&[("box_size", Value::from(3)), ("boxSize", Value::from(5))]);
        let err = construct::<Probe>(&conflicting).err().unwrap();
        assert!(matches!(err, Error::SchemaValidation { field: Some(ref f), .. } if f == "boxSize"));
    }

    #[test]
    fn test_null_optional_and_unknown_keys() {
        let value = object(&[("name", Value::Null), ("extra", Value::from(true))]);
        let probe: Probe = construct(&value).unwrap();
        assert_eq!(probe.name, None);
        assert_eq!(probe.size, 1);
    }

    #[test]
    fn test_type_errors_name_the_field() {
        let err = construct::<Probe>(&object(&[("boxSize", Value::from("big"))]))
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'boxSize': expected integer, found string \"big\""
        );
    }

    #[test]
    fn test_non_object_input() {
        let err = construct::<Probe>(&Value::from(1)).err().unwrap();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("box_width"), "boxWidth");
        assert_eq!(to_camel_case("use_point_style"), "usePointStyle");
        assert_eq!(to_camel_case("_private"), "private");
        assert_eq!(to_camel_case("type"), "type");
    }

    #[test]
    fn test_fields_set_ignored_by_equality() {
        let mut a = FieldsSet::new();
        a.mark("padding");
        assert_eq!(a, FieldsSet::new());
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["padding"]);
    }
}
