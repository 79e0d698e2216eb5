//! Datasets and the series shapes they accept.
//!
//! A dataset's `data` is one of four shapes, tried in this order:
//!
//! 1. [`DatasetData::Primitive`]: `[1, 2.5, 3]`
//! 2. [`DatasetData::Indexed`]: `[[0, 1.5], [1, null]]`
//! 3. [`DatasetData::Objects`]: `[{"x": "2025-08-11", "y": 2}]`
//! 4. [`DatasetData::Generic`]: any list of objects
//!
//! The first shape that accepts every element wins, so an empty list is
//! always primitive and `{x, y, r}` bubble points fall through to generic.
//!
//! ```rust
//! use chartjs_schema::{value, Dataset, DatasetData};
//! use chartjs_schema::model::FromValue;
//!
//! let data = DatasetData::from_value(&value!([{ "x": "2025-08-11", "y": 2 }])).unwrap();
//! assert_eq!(data.shape_name(), "objects");
//!
//! let dataset = Dataset::new(vec![0, 1, 2, 3]).with_label("Energy");
//! assert_eq!(dataset.data().len(), 4);
//! ```

use crate::model::{FieldDefault, FieldInput, FieldSpec, FieldsSet, FromValue, Model, ToValue};
use crate::value::describe;
use crate::{Color, Error, List, Map, Number, Result, SerializeOptions, Value};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The `x` coordinate of an object-shaped point.
#[derive(Clone, Debug, PartialEq)]
pub enum XValue {
    Number(Number),
    /// A calendar date, written as `YYYY-MM-DD`.
    Date(NaiveDate),
    Text(String),
}

impl XValue {
    /// Classifies a string: ISO calendar dates become [`XValue::Date`], any
    /// other text is kept verbatim.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match NaiveDate::parse_from_str(text, DATE_FORMAT) {
            // only canonical spellings, so the string survives a round trip
            Ok(date) if date.format(DATE_FORMAT).to_string() == text => XValue::Date(date),
            _ => XValue::Text(text.to_string()),
        }
    }
}

impl From<i64> for XValue {
    fn from(x: i64) -> Self {
        XValue::Number(Number::Integer(x))
    }
}

impl From<f64> for XValue {
    fn from(x: f64) -> Self {
        XValue::Number(Number::Float(x))
    }
}

impl From<Number> for XValue {
    fn from(x: Number) -> Self {
        XValue::Number(x)
    }
}

impl From<NaiveDate> for XValue {
    fn from(date: NaiveDate) -> Self {
        XValue::Date(date)
    }
}

impl From<&str> for XValue {
    fn from(text: &str) -> Self {
        XValue::from_text(text)
    }
}

impl From<String> for XValue {
    fn from(text: String) -> Self {
        XValue::from_text(&text)
    }
}

impl ToValue for XValue {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        Ok(match self {
            XValue::Number(n) => n.to_value(options)?,
            XValue::Date(date) => Value::String(date.format(DATE_FORMAT).to_string()),
            XValue::Text(text) => Value::String(text.clone()),
        })
    }
}

impl FromValue for XValue {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(XValue::Number(*n)),
            Value::String(s) => Ok(XValue::from_text(s)),
            other => Err(Error::schema("number or string", &describe(other))),
        }
    }
}

/// A point of the object series shape: exactly the keys `x` and `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: XValue,
    pub y: Option<Number>,
}

impl Point {
    #[must_use]
    pub fn new(x: impl Into<XValue>, y: impl Into<Number>) -> Self {
        Point {
            x: x.into(),
            y: Some(y.into()),
        }
    }

    /// A point with no `y` value, written as `null`.
    #[must_use]
    pub fn at(x: impl Into<XValue>) -> Self {
        Point {
            x: x.into(),
            y: None,
        }
    }
}

impl ToValue for Point {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        let mut map = Map::with_capacity(2);
        let x = self.x.to_value(options).map_err(|e| e.with_field("x"))?;
        map.insert("x".to_string(), x);
        let y = match &self.y {
            Some(y) => y.to_value(options).map_err(|e| e.with_field("y"))?,
            None => Value::Null,
        };
        map.insert("y".to_string(), y);
        Ok(Value::Object(map))
    }
}

impl FromValue for Point {
    fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::schema("{x, y} object", &describe(value)))?;
        if let Some(extra) = object.keys().find(|k| *k != "x" && *k != "y") {
            return Err(Error::schema("only the keys x and y", &format!("key {:?}", extra)));
        }
        let x = object
            .get("x")
            .ok_or_else(|| Error::schema("an x coordinate", "none").with_field("x"))
            .and_then(|x| XValue::from_value(x).map_err(|e| e.with_field("x")))?;
        let y = match object.get("y") {
            None => return Err(Error::schema("a y value or null", "none").with_field("y")),
            Some(Value::Null) => None,
            Some(y) => Some(Number::from_value(y).map_err(|e| e.with_field("y"))?),
        };
        Ok(Point { x, y })
    }
}

impl ToValue for (i64, Option<Number>) {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        let y = match &self.1 {
            Some(y) => y.to_value(options)?,
            None => Value::Null,
        };
        Ok(Value::Array(vec![Value::from(self.0), y]))
    }
}

impl FromValue for (i64, Option<Number>) {
    fn from_value(value: &Value) -> Result<Self> {
        match value.as_array().map(Vec::as_slice) {
            Some([index, y]) => {
                let index = i64::from_value(index)?;
                let y = match y {
                    Value::Null => None,
                    y => Some(Number::from_value(y)?),
                };
                Ok((index, y))
            }
            _ => Err(Error::schema("[index, value] pair", &describe(value))),
        }
    }
}

/// The series of a dataset, in one of the accepted shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetData {
    Primitive(List<Number>),
    Indexed(List<(i64, Option<Number>)>),
    Objects(List<Point>),
    Generic(List<Map>),
}

impl DatasetData {
    /// A plain list of numbers.
    pub fn primitive<N: Into<Number>>(values: impl IntoIterator<Item = N>) -> Self {
        DatasetData::Primitive(values.into_iter().map(Into::into).collect())
    }

    /// `(index, value)` pairs; a `None` value is a gap in the series.
    pub fn indexed(pairs: impl IntoIterator<Item = (i64, Option<Number>)>) -> Self {
        DatasetData::Indexed(pairs.into_iter().collect())
    }

    pub fn points(points: impl IntoIterator<Item = Point>) -> Self {
        DatasetData::Objects(points.into_iter().collect())
    }

    pub fn generic(objects: impl IntoIterator<Item = Map>) -> Self {
        DatasetData::Generic(objects.into_iter().collect())
    }

    /// Builds a series from caller-defined serializable items.
    ///
    /// Each item is converted to a [`Value`] and the result goes through the
    /// same shape matching as dynamic input.
    ///
    /// # Errors
    ///
    /// Fails if an item cannot be serialized or the items match no shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::DatasetData;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Bubble {
    ///     x: i64,
    ///     y: i64,
    ///     r: i64,
    /// }
    ///
    /// let data = DatasetData::from_serialize(&[Bubble { x: 1, y: 2, r: 5 }]).unwrap();
    /// assert_eq!(data.shape_name(), "generic");
    /// ```
    pub fn from_serialize<T: Serialize>(items: &[T]) -> Result<Self> {
        let values = items
            .iter()
            .map(crate::to_value)
            .collect::<Result<Vec<_>>>()?;
        DatasetData::from_value(&Value::Array(values))
    }

    /// Name of the matched shape: `primitive`, `indexed`, `objects` or
    /// `generic`.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            DatasetData::Primitive(_) => "primitive",
            DatasetData::Indexed(_) => "indexed",
            DatasetData::Objects(_) => "objects",
            DatasetData::Generic(_) => "generic",
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DatasetData::Primitive(list) => list.len(),
            DatasetData::Indexed(list) => list.len(),
            DatasetData::Objects(list) => list.len(),
            DatasetData::Generic(list) => list.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DatasetData {
    fn default() -> Self {
        DatasetData::Primitive(List::new())
    }
}

impl From<Vec<i64>> for DatasetData {
    fn from(values: Vec<i64>) -> Self {
        DatasetData::primitive(values)
    }
}

impl From<Vec<f64>> for DatasetData {
    fn from(values: Vec<f64>) -> Self {
        DatasetData::primitive(values)
    }
}

impl From<Vec<Number>> for DatasetData {
    fn from(values: Vec<Number>) -> Self {
        DatasetData::Primitive(values.into())
    }
}

impl From<Vec<(i64, Option<Number>)>> for DatasetData {
    fn from(pairs: Vec<(i64, Option<Number>)>) -> Self {
        DatasetData::Indexed(pairs.into())
    }
}

impl From<Vec<Point>> for DatasetData {
    fn from(points: Vec<Point>) -> Self {
        DatasetData::Objects(points.into())
    }
}

impl From<Vec<Map>> for DatasetData {
    fn from(objects: Vec<Map>) -> Self {
        DatasetData::Generic(objects.into())
    }
}

impl ToValue for DatasetData {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        match self {
            DatasetData::Primitive(list) => list.to_value(options),
            DatasetData::Indexed(list) => list.to_value(options),
            DatasetData::Objects(list) => list.to_value(options),
            DatasetData::Generic(list) => list.to_value(options),
        }
    }
}

impl FromValue for DatasetData {
    fn from_value(value: &Value) -> Result<Self> {
        let Some(items) = value.as_array() else {
            return Err(Error::schema("array of data points", &describe(value)));
        };

        let attempts: [(&str, fn(&[Value]) -> Result<DatasetData>); 4] = [
            ("primitive", |v| List::from_values(v).map(DatasetData::Primitive)),
            ("indexed", |v| List::from_values(v).map(DatasetData::Indexed)),
            ("objects", |v| List::from_values(v).map(DatasetData::Objects)),
            ("generic", |v| List::from_values(v).map(DatasetData::Generic)),
        ];

        let mut last_error = None;
        for (shape, attempt) in attempts {
            match attempt(items) {
                Ok(data) => {
                    trace!(shape, len = items.len(), "matched dataset shape");
                    return Ok(data);
                }
                Err(err) => {
                    trace!(shape, error = %err, "dataset shape rejected");
                    last_error = Some(err);
                }
            }
        }

        Err(Error::schema(
            "numbers, [index, value] pairs, {x, y} points or objects",
            &last_error.map_or_else(|| describe(value), |e| e.to_string()),
        ))
    }
}

/// One series of a chart.
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::{serialize, value, Color, Dataset};
///
/// let dataset = Dataset::new(vec![3, 1, 2])
///     .with_label("Anxiety")
///     .with_border_color(Color::parse("red").unwrap());
///
/// assert_eq!(
///     serialize(&dataset).unwrap(),
///     value!({ "label": "Anxiety", "borderColor": "#ff0000", "data": [3, 1, 2] })
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    label: Option<String>,
    border_color: Color,
    border_cap_style: String,
    background_color: Color,
    border_dash: List<i64>,
    border_dash_offset: f64,
    data: DatasetData,
    fill: Option<bool>,
    tension: f64,
    fields_set: FieldsSet,
}

impl Dataset {
    /// Creates a dataset over `data` with every other field at its default.
    #[must_use]
    pub fn new(data: impl Into<DatasetData>) -> Self {
        let mut fields_set = FieldsSet::new();
        fields_set.mark("data");
        Dataset {
            label: None,
            border_color: Color::DEFAULT_FILL,
            border_cap_style: "butt".to_string(),
            background_color: Color::DEFAULT_FILL,
            border_dash: List::new(),
            border_dash_offset: 0.0,
            data: data.into(),
            fill: None,
            tension: 0.0,
            fields_set,
        }
    }

    /// An unfilled line series with slight curve smoothing.
    #[must_use]
    pub fn line(data: impl Into<DatasetData>) -> Self {
        Dataset::new(data).with_fill(false).with_tension(0.1)
    }

    field_accessors! {
        optional label, with_label: String;
        copy border_color, with_border_color: Color;
        /// Line cap style, e.g. `butt`, `round` or `square`.
        text border_cap_style, with_border_cap_style: String;
        copy background_color, with_background_color: Color;
        /// Dash pattern as alternating line and gap lengths.
        owned border_dash, with_border_dash: List<i64>;
        copy border_dash_offset, with_border_dash_offset: f64;
        owned data, with_data: DatasetData;
        optional_copy fill, with_fill: bool;
        /// Bezier curve tension; `0` draws straight lines.
        copy tension, with_tension: f64;
    }

    /// Appends one segment length to the dash pattern.
    pub fn push_border_dash(&mut self, length: i64) {
        self.border_dash.push(length);
        self.fields_set.mark("border_dash");
    }
}

impl Model for Dataset {
    const NAME: &'static str = "Dataset";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("label", "label"),
        FieldSpec::with_default("border_color", "borderColor", FieldDefault::Str("#0000001a")),
        FieldSpec::with_default("border_cap_style", "borderCapStyle", FieldDefault::Str("butt")),
        FieldSpec::with_default(
            "background_color",
            "backgroundColor",
            FieldDefault::Str("#0000001a"),
        ),
        FieldSpec::with_default("border_dash", "borderDash", FieldDefault::EmptyList),
        FieldSpec::with_default(
            "border_dash_offset",
            "borderDashOffset",
            FieldDefault::Float(0.0),
        ),
        FieldSpec::required("data", "data"),
        FieldSpec::optional("fill", "fill"),
        FieldSpec::with_default("tension", "tension", FieldDefault::Float(0.0)),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let value = match name {
            "label" => return crate::ser::optional(self.label.as_ref(), options),
            "border_color" => self.border_color.to_value(options)?,
            "border_cap_style" => self.border_cap_style.to_value(options)?,
            "background_color" => self.background_color.to_value(options)?,
            "border_dash" => self.border_dash.to_value(options)?,
            "border_dash_offset" => self.border_dash_offset.to_value(options)?,
            "data" => self.data.to_value(options)?,
            "fill" => return crate::ser::optional(self.fill.as_ref(), options),
            "tension" => self.tension.to_value(options)?,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        Ok(Some(value))
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        Ok(Dataset {
            label: input.optional("label")?,
            border_color: input.or_default("border_color", Color::DEFAULT_FILL)?,
            border_cap_style: input.or_default("border_cap_style", "butt".to_string())?,
            background_color: input.or_default("background_color", Color::DEFAULT_FILL)?,
            border_dash: input.or_default("border_dash", List::new())?,
            border_dash_offset: input.or_default("border_dash_offset", 0.0)?,
            data: input.required("data")?,
            fill: input.optional("fill")?,
            tension: input.or_default("tension", 0.0)?,
            fields_set: input.finish(),
        })
    }
}

impl_model_serde!(Dataset);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serialize, value};

    #[test]
    fn test_primitive_shape() {
        let data = DatasetData::from_value(&value!([0, 1, 2, 3])).unwrap();
        assert_eq!(data, DatasetData::from(vec![0, 1, 2, 3]));
        assert_eq!(
            data.to_value(&SerializeOptions::new()).unwrap(),
            value!([0, 1, 2, 3])
        );
    }

    #[test]
    fn test_empty_list_is_primitive() {
        let data = DatasetData::from_value(&value!([])).unwrap();
        assert_eq!(data.shape_name(), "primitive");
        assert!(data.is_empty());
    }

    #[test]
    fn test_indexed_shape_with_gaps() {
        let data = DatasetData::from_value(&value!([[0, 1.5], [1, null]])).unwrap();
        assert_eq!(
            data,
            DatasetData::indexed([(0, Some(Number::Float(1.5))), (1, None)])
        );
        assert_eq!(
            data.to_value(&SerializeOptions::new()).unwrap(),
            value!([[0, 1.5], [1, null]])
        );
    }

    #[test]
    fn test_object_shape_keeps_dates() {
        let input = value!([{ "x": "2025-08-11", "y": 2 }, { "x": "Monday", "y": null }]);
        let data = DatasetData::from_value(&input).unwrap();
        let DatasetData::Objects(points) = &data else {
            panic!("expected object points, got {}", data.shape_name());
        };
        assert_eq!(
            points[0].x,
            XValue::Date(NaiveDate::from_ymd_opt(2025, 8, 11).unwrap())
        );
        assert_eq!(points[1], Point::at("Monday"));
        assert_eq!(data.to_value(&SerializeOptions::new()).unwrap(), input);
    }

    #[test]
    fn test_non_canonical_date_stays_text() {
        assert_eq!(XValue::from_text("2025-8-11"), XValue::Text("2025-8-11".to_string()));
    }

    #[test]
    fn test_extra_keys_fall_through_to_generic() {
        let data = DatasetData::from_value(&value!([{ "x": 1, "y": 2, "r": 5 }])).unwrap();
        assert_eq!(data.shape_name(), "generic");

        let data = DatasetData::from_value(&value!([{ "x": 1 }])).unwrap();
        assert_eq!(data.shape_name(), "generic");
    }

    #[test]
    fn test_mixed_elements_match_no_shape() {
        let err = DatasetData::from_value(&value!([1, "two"])).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));

        let err = DatasetData::from_value(&value!("1,2,3")).unwrap_err();
        assert!(err.to_string().contains("found string"));
    }

    #[test]
    fn test_dataset_defaults_are_pruned() {
        let dataset = Dataset::new(vec![1, 2]);
        assert_eq!(serialize(&dataset).unwrap(), value!({ "data": [1, 2] }));
        assert_eq!(dataset.border_color(), Color::from_rgba(0, 0, 0, 0.1).unwrap());
        assert_eq!(dataset.border_cap_style(), "butt");
        assert_eq!(dataset.fill(), None);
    }

    #[test]
    fn test_line_preset() {
        let dataset = Dataset::line(vec![1.0, 2.0]);
        assert_eq!(dataset.fill(), Some(false));
        assert_eq!(dataset.tension(), 0.1);
        assert_eq!(
            serialize(&dataset).unwrap(),
            value!({ "data": [1.0, 2.0], "fill": false, "tension": 0.1 })
        );
    }

    #[test]
    fn test_border_dash_append() {
        let mut dataset = Dataset::new(vec![1]).with_border_dash(vec![5]);
        dataset.push_border_dash(10);
        assert_eq!(dataset.border_dash().as_slice(), &[5, 10]);
        assert!(dataset.fields_set().contains("border_dash"));
    }

    #[test]
    fn test_non_finite_numbers_fail_to_serialize() {
        let err = serialize(&Dataset::new(vec![1]).with_tension(f64::NAN)).unwrap_err();
        assert_eq!(err, Error::schema("finite number", "NaN").with_field("tension"));

        let err = serialize(&Dataset::new(vec![1.0, f64::INFINITY])).unwrap_err();
        assert_eq!(err, Error::schema("finite number", "inf").with_field("data"));

        let points = DatasetData::points([Point::new(1, f64::NEG_INFINITY)]);
        let err = serialize(&Dataset::new(points)).unwrap_err();
        assert_eq!(err, Error::schema("finite number", "-inf").with_field("y"));
    }

    #[test]
    fn test_dataset_requires_data() {
        let err = crate::from_value::<Dataset>(&value!({ "label": "empty" })).unwrap_err();
        assert_eq!(err, Error::required_field_missing("Dataset", "data"));
    }

    #[test]
    fn test_dataset_from_either_spelling() {
        let a: Dataset = crate::from_value(&value!({
            "data": [1],
            "border_cap_style": "round",
            "borderDashOffset": 2
        }))
        .unwrap();
        assert_eq!(a.border_cap_style(), "round");
        assert_eq!(a.border_dash_offset(), 2.0);
    }
}
