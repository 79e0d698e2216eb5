//! The chart root and its top-level sections.
//!
//! ```rust
//! use chartjs_schema::{to_string, Chart, ChartType, Data, Dataset};
//!
//! let data = Data::new(vec![Dataset::new(vec![1, 2, 3])]);
//! let chart = Chart::new(data).with_chart_type(ChartType::Line);
//!
//! assert_eq!(
//!     to_string(&chart).unwrap(),
//!     r#"{"type":"line","data":{"datasets":[{"data":[1,2,3]}]}}"#
//! );
//! ```

use crate::model::{FieldDefault, FieldInput, FieldSpec, FieldsSet, Model, ToValue};
use crate::ser::optional;
use crate::{ChartType, Color, Dataset, Error, List, Plugins, Result, SerializeOptions, Value};
use std::fmt;
use std::sync::Arc;

/// Chart layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    padding: i64,
    fields_set: FieldsSet,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    field_accessors! {
        copy padding, with_padding: i64;
    }
}

impl Model for Layout {
    const NAME: &'static str = "Layout";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::with_default(
        "padding",
        "padding",
        FieldDefault::Int(0),
    )];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        match name {
            "padding" => self.padding.to_value(options).map(Some),
            other => Err(Error::unsupported_field(Self::NAME, other)),
        }
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        Ok(Layout {
            padding: input.or_default("padding", 0)?,
            fields_set: input.finish(),
        })
    }
}

/// The `data` section: datasets plus optional axis labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Data {
    datasets: List<Dataset>,
    labels: Option<List<String>>,
    fields_set: FieldsSet,
}

impl Data {
    #[must_use]
    pub fn new(datasets: impl Into<List<Dataset>>) -> Self {
        let mut fields_set = FieldsSet::new();
        fields_set.mark("datasets");
        Data {
            datasets: datasets.into(),
            labels: None,
            fields_set,
        }
    }

    field_accessors! {
        owned datasets, with_datasets: List<Dataset>;
        /// Category labels along the index axis.
        optional labels, with_labels: List<String>;
    }

    pub fn push_dataset(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
        self.fields_set.mark("datasets");
    }

    /// Appends a label, starting the label list if there is none yet.
    pub fn push_label(&mut self, label: impl Into<String>) {
        self.labels
            .get_or_insert_with(List::new)
            .push(label.into());
        self.fields_set.mark("labels");
    }
}

impl Model for Data {
    const NAME: &'static str = "Data";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("datasets", "datasets"),
        FieldSpec::optional("labels", "labels"),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        match name {
            "datasets" => self.datasets.to_value(options).map(Some),
            "labels" => optional(self.labels.as_ref(), options),
            other => Err(Error::unsupported_field(Self::NAME, other)),
        }
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        Ok(Data {
            datasets: input.required("datasets")?,
            labels: input.optional("labels")?,
            fields_set: input.finish(),
        })
    }
}

/// Callback invoked with the new width and height when the chart resizes.
///
/// Callbacks have no JSON form: they are never serialized and are dropped
/// from dynamic input.
#[derive(Clone)]
pub struct ResizeCallback(Arc<dyn Fn(u32, u32) + Send + Sync>);

impl ResizeCallback {
    pub fn new(callback: impl Fn(u32, u32) + Send + Sync + 'static) -> Self {
        ResizeCallback(Arc::new(callback))
    }

    pub fn call(&self, width: u32, height: u32) {
        (self.0)(width, height);
    }
}

impl fmt::Debug for ResizeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResizeCallback(..)")
    }
}

impl<F: Fn(u32, u32) + Send + Sync + 'static> From<F> for ResizeCallback {
    fn from(callback: F) -> Self {
        ResizeCallback::new(callback)
    }
}

/// The `options` section.
///
/// Equality ignores `on_resize`.
#[derive(Clone, Debug)]
pub struct Options {
    responsive: bool,
    maintain_aspect_ratio: bool,
    aspect_ratio: f64,
    on_resize: Option<ResizeCallback>,
    resize_delay: i64,
    plugins: Plugins,
    fields_set: FieldsSet,
}

impl Options {
    #[must_use]
    pub fn new(plugins: impl Into<Plugins>) -> Self {
        let mut fields_set = FieldsSet::new();
        fields_set.mark("plugins");
        Options {
            responsive: true,
            maintain_aspect_ratio: true,
            aspect_ratio: 2.0,
            on_resize: None,
            resize_delay: 0,
            plugins: plugins.into(),
            fields_set,
        }
    }

    field_accessors! {
        copy responsive, with_responsive: bool;
        copy maintain_aspect_ratio, with_maintain_aspect_ratio: bool;
        /// Width divided by height.
        copy aspect_ratio, with_aspect_ratio: f64;
        optional on_resize, with_on_resize: ResizeCallback;
        /// Debounce delay for resize updates, in milliseconds.
        copy resize_delay, with_resize_delay: i64;
        owned plugins, with_plugins: Plugins;
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.responsive == other.responsive
            && self.maintain_aspect_ratio == other.maintain_aspect_ratio
            && self.aspect_ratio == other.aspect_ratio
            && self.resize_delay == other.resize_delay
            && self.plugins == other.plugins
    }
}

impl Model for Options {
    const NAME: &'static str = "Options";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default("responsive", "responsive", FieldDefault::Bool(true)),
        FieldSpec::with_default(
            "maintain_aspect_ratio",
            "maintainAspectRatio",
            FieldDefault::Bool(true),
        ),
        FieldSpec::with_default("aspect_ratio", "aspectRatio", FieldDefault::Float(2.0)),
        FieldSpec::optional("on_resize", "onResize").skip_serializing(),
        FieldSpec::with_default("resize_delay", "resizeDelay", FieldDefault::Int(0)),
        FieldSpec::required("plugins", "plugins"),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let value = match name {
            "responsive" => self.responsive.to_value(options)?,
            "maintain_aspect_ratio" => self.maintain_aspect_ratio.to_value(options)?,
            "aspect_ratio" => self.aspect_ratio.to_value(options)?,
            "on_resize" => return Ok(None),
            "resize_delay" => self.resize_delay.to_value(options)?,
            "plugins" => self.plugins.to_value(options)?,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        Ok(Some(value))
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        input.ignore("on_resize");
        Ok(Options {
            responsive: input.or_default("responsive", true)?,
            maintain_aspect_ratio: input.or_default("maintain_aspect_ratio", true)?,
            aspect_ratio: input.or_default("aspect_ratio", 2.0)?,
            on_resize: None,
            resize_delay: input.or_default("resize_delay", 0)?,
            plugins: input.required("plugins")?,
            fields_set: input.finish(),
        })
    }
}

/// Global element defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    background_color: Color,
    border_color: Color,
    color: Color,
    fields_set: FieldsSet,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            background_color: Color::DEFAULT_FILL,
            border_color: Color::DEFAULT_FILL,
            color: Color::DEFAULT_FONT,
            fields_set: FieldsSet::new(),
        }
    }
}

impl Defaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    field_accessors! {
        copy background_color, with_background_color: Color;
        copy border_color, with_border_color: Color;
        /// Default font color.
        copy color, with_color: Color;
    }
}

impl Model for Defaults {
    const NAME: &'static str = "Defaults";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default(
            "background_color",
            "backgroundColor",
            FieldDefault::Str("#0000001a"),
        ),
        FieldSpec::with_default("border_color", "borderColor", FieldDefault::Str("#0000001a")),
        FieldSpec::with_default("color", "color", FieldDefault::Str("#666666")),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let color = match name {
            "background_color" => self.background_color,
            "border_color" => self.border_color,
            "color" => self.color,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        color.to_value(options).map(Some)
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        Ok(Defaults {
            background_color: input.or_default("background_color", Color::DEFAULT_FILL)?,
            border_color: input.or_default("border_color", Color::DEFAULT_FILL)?,
            color: input.or_default("color", Color::DEFAULT_FONT)?,
            fields_set: input.finish(),
        })
    }
}

/// The chart root: type, data and options.
///
/// Serializes with `type` first, so the output is a ready-to-use Chart.js
/// configuration object.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    chart_type: ChartType,
    data: Data,
    options: Option<Options>,
    fields_set: FieldsSet,
}

impl Chart {
    #[must_use]
    pub fn new(data: Data) -> Self {
        let mut fields_set = FieldsSet::new();
        fields_set.mark("data");
        Chart {
            chart_type: ChartType::Bar,
            data,
            options: None,
            fields_set,
        }
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self.fields_set.mark("type");
        self
    }

    field_accessors! {
        owned data, with_data: Data;
        optional options, with_options: Options;
    }

    /// The datasets of the chart's data section.
    #[must_use]
    pub fn datasets(&self) -> &List<Dataset> {
        self.data.datasets()
    }

    /// Mutable access to the data section, for appending datasets or labels.
    pub fn data_mut(&mut self) -> &mut Data {
        self.fields_set.mark("data");
        &mut self.data
    }
}

impl Model for Chart {
    const NAME: &'static str = "Chart";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default("type", "type", FieldDefault::Str("bar")),
        FieldSpec::required("data", "data"),
        FieldSpec::optional("options", "options"),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        match name {
            "type" => self.chart_type.to_value(options).map(Some),
            "data" => self.data.to_value(options).map(Some),
            "options" => optional(self.options.as_ref(), options),
            other => Err(Error::unsupported_field(Self::NAME, other)),
        }
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        Ok(Chart {
            chart_type: input.or_default("type", ChartType::Bar)?,
            data: input.required("data")?,
            options: input.optional("options")?,
            fields_set: input.finish(),
        })
    }
}

impl_model_serde!(Layout, Data, Options, Defaults, Chart);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_value, serialize, serialize_with_options, value, Exclude, Title};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn title_plugins() -> Plugins {
        let mut plugins = Plugins::new();
        plugins.insert("title", Title::new().with_text("Mood"));
        plugins
    }

    #[test]
    fn test_layout_and_defaults_prune_to_empty() {
        assert_eq!(serialize(&Layout::new()).unwrap(), value!({}));
        assert_eq!(serialize(&Defaults::new()).unwrap(), value!({}));
        assert_eq!(
            serialize(&Layout::new().with_padding(4)).unwrap(),
            value!({ "padding": 4 })
        );
    }

    #[test]
    fn test_data_labels_append() {
        let mut data = Data::new(vec![Dataset::new(vec![1, 2])]);
        assert_eq!(data.labels(), None);
        data.push_label("Mon");
        data.push_label("Tue");
        data.push_dataset(Dataset::new(vec![3, 4]));
        assert_eq!(data.datasets().len(), 2);
        assert_eq!(
            serialize(&data).unwrap(),
            value!({
                "datasets": [{ "data": [1, 2] }, { "data": [3, 4] }],
                "labels": ["Mon", "Tue"]
            })
        );
    }

    #[test]
    fn test_options_never_emit_callback() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let options = Options::new(title_plugins())
            .with_aspect_ratio(1.5)
            .with_on_resize(move |w: u32, _h: u32| {
                counter.fetch_add(w, Ordering::SeqCst);
            });

        options.on_resize().unwrap().call(3, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let all = serialize_with_options(&options, &SerializeOptions::all_fields()).unwrap();
        assert!(all.get("onResize").is_none());
        assert_eq!(all.get("aspectRatio"), Some(&Value::from(1.5)));
        assert_eq!(all.get("resizeDelay"), Some(&Value::from(0)));
    }

    #[test]
    fn test_options_drop_callback_input() {
        let options: Options = from_value(&value!({
            "plugins": {},
            "onResize": "handler",
            "resizeDelay": 100
        }))
        .unwrap();
        assert!(options.on_resize().is_none());
        assert_eq!(options.resize_delay(), 100);
    }

    #[test]
    fn test_options_require_plugins() {
        let err = from_value::<Options>(&value!({ "responsive": false })).unwrap_err();
        assert_eq!(err, Error::required_field_missing("Options", "plugins"));
    }

    #[test]
    fn test_chart_type_key() {
        let chart = Chart::new(Data::new(vec![Dataset::new(vec![1])]));
        assert_eq!(serialize(&chart).unwrap().get("type"), None);

        let chart = chart.with_chart_type(ChartType::Mixed);
        let all = serialize_with_options(&chart, &SerializeOptions::all_fields()).unwrap();
        assert_eq!(all.get("type"), Some(&Value::from("bar")));

        let unset = SerializeOptions::new().with_exclude(Exclude::Unset);
        let kept = serialize_with_options(&chart, &unset).unwrap();
        assert_eq!(kept.get("type"), Some(&Value::from("bar")));
    }

    #[test]
    fn test_chart_datasets_shortcut() {
        let mut chart = Chart::new(Data::new(vec![Dataset::new(vec![1])]));
        chart.data_mut().push_dataset(Dataset::line(vec![2]));
        assert_eq!(chart.datasets().len(), 2);
        assert_eq!(chart.datasets()[1].tension(), 0.1);
    }

    #[test]
    fn test_chart_from_dynamic_input() {
        let chart: Chart = from_value(&value!({
            "type": "line",
            "data": { "datasets": [{ "data": [1, 2] }], "labels": ["a", "b"] },
            "options": { "plugins": { "legend": { "position": "right" } } }
        }))
        .unwrap();
        assert_eq!(chart.chart_type(), ChartType::Line);
        assert_eq!(chart.data().labels().map(List::len), Some(2));
        assert!(chart.options().is_some());
    }
}
