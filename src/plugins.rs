//! Title, legend and the `options.plugins` mapping.
//!
//! ```rust
//! use chartjs_schema::{to_string, Legend, Options, Plugins, Position, Title};
//!
//! let mut plugins = Plugins::new();
//! plugins.insert("legend", Legend::new().with_position(Position::Bottom));
//! plugins.insert("title", Title::new().with_text("Mood"));
//!
//! let json = to_string(&Options::new(plugins)).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"plugins":{"legend":{"position":"bottom"},"title":{"text":"Mood"}}}"#
//! );
//! ```

use crate::model::{
    construct, FieldDefault, FieldInput, FieldSpec, FieldsSet, FromValue, Model, ToValue,
};
use crate::value::describe;
use crate::{Color, Error, Map, Position, Result, SerializeOptions, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chart title.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    text: String,
    display: bool,
    position: Position,
    padding: i64,
    fields_set: FieldsSet,
}

impl Default for Title {
    fn default() -> Self {
        Title {
            text: "My Chart".to_string(),
            display: true,
            position: Position::Top,
            padding: 10,
            fields_set: FieldsSet::new(),
        }
    }
}

impl Title {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    field_accessors! {
        text text, with_text: String;
        copy display, with_display: bool;
        copy position, with_position: Position;
        /// Padding around the title, in pixels.
        copy padding, with_padding: i64;
    }
}

impl Model for Title {
    const NAME: &'static str = "Title";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default("text", "text", FieldDefault::Str("My Chart")),
        FieldSpec::with_default("display", "display", FieldDefault::Bool(true)),
        FieldSpec::with_default("position", "position", FieldDefault::Str("top")),
        FieldSpec::with_default("padding", "padding", FieldDefault::Int(10)),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let value = match name {
            "text" => self.text.to_value(options)?,
            "display" => self.display.to_value(options)?,
            "position" => self.position.to_value(options)?,
            "padding" => self.padding.to_value(options)?,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        Ok(Some(value))
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        let defaults = Title::default();
        Ok(Title {
            text: input.or_default("text", defaults.text)?,
            display: input.or_default("display", defaults.display)?,
            position: input.or_default("position", defaults.position)?,
            padding: input.or_default("padding", defaults.padding)?,
            fields_set: input.finish(),
        })
    }
}

/// Styling of the legend's item labels.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLabel {
    box_width: i64,
    padding: i64,
    filter: Option<String>,
    font_size: i64,
    font_style: String,
    font_color: Color,
    use_point_style: bool,
    fields_set: FieldsSet,
}

impl Default for LegendLabel {
    fn default() -> Self {
        LegendLabel {
            box_width: 40,
            padding: 10,
            filter: None,
            font_size: 12,
            font_style: "normal".to_string(),
            font_color: Color::DEFAULT_FONT,
            use_point_style: false,
            fields_set: FieldsSet::new(),
        }
    }
}

impl LegendLabel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    field_accessors! {
        /// Width of the colored box, in pixels.
        copy box_width, with_box_width: i64;
        copy padding, with_padding: i64;
        /// Name of a label filter callback registered on the page.
        optional filter, with_filter: String;
        copy font_size, with_font_size: i64;
        text font_style, with_font_style: String;
        copy font_color, with_font_color: Color;
        copy use_point_style, with_use_point_style: bool;
    }
}

impl Model for LegendLabel {
    const NAME: &'static str = "LegendLabel";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default("box_width", "boxWidth", FieldDefault::Int(40)),
        FieldSpec::with_default("padding", "padding", FieldDefault::Int(10)),
        FieldSpec::optional("filter", "filter"),
        FieldSpec::with_default("font_size", "fontSize", FieldDefault::Int(12)),
        FieldSpec::with_default("font_style", "fontStyle", FieldDefault::Str("normal")),
        FieldSpec::with_default("font_color", "fontColor", FieldDefault::Str("#666666")),
        FieldSpec::with_default("use_point_style", "usePointStyle", FieldDefault::Bool(false)),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let value = match name {
            "box_width" => self.box_width.to_value(options)?,
            "padding" => self.padding.to_value(options)?,
            "filter" => return crate::ser::optional(self.filter.as_ref(), options),
            "font_size" => self.font_size.to_value(options)?,
            "font_style" => self.font_style.to_value(options)?,
            "font_color" => self.font_color.to_value(options)?,
            "use_point_style" => self.use_point_style.to_value(options)?,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        Ok(Some(value))
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        let defaults = LegendLabel::default();
        Ok(LegendLabel {
            box_width: input.or_default("box_width", defaults.box_width)?,
            padding: input.or_default("padding", defaults.padding)?,
            filter: input.optional("filter")?,
            font_size: input.or_default("font_size", defaults.font_size)?,
            font_style: input.or_default("font_style", defaults.font_style)?,
            font_color: input.or_default("font_color", defaults.font_color)?,
            use_point_style: input.or_default("use_point_style", defaults.use_point_style)?,
            fields_set: input.finish(),
        })
    }
}

/// Chart legend.
///
/// `labels` names a labeling strategy rather than embedding a
/// [`LegendLabel`].
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    display: bool,
    position: Position,
    full_width: bool,
    reverse: bool,
    labels: String,
    fields_set: FieldsSet,
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            display: true,
            position: Position::Top,
            full_width: true,
            reverse: false,
            labels: "default".to_string(),
            fields_set: FieldsSet::new(),
        }
    }
}

impl Legend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    field_accessors! {
        copy display, with_display: bool;
        copy position, with_position: Position;
        copy full_width, with_full_width: bool;
        /// Show datasets in reverse order.
        copy reverse, with_reverse: bool;
        text labels, with_labels: String;
    }
}

impl Model for Legend {
    const NAME: &'static str = "Legend";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::with_default("display", "display", FieldDefault::Bool(true)),
        FieldSpec::with_default("position", "position", FieldDefault::Str("top")),
        FieldSpec::with_default("full_width", "fullWidth", FieldDefault::Bool(true)),
        FieldSpec::with_default("reverse", "reverse", FieldDefault::Bool(false)),
        FieldSpec::with_default("labels", "labels", FieldDefault::Str("default")),
    ];

    fn fields_set(&self) -> &FieldsSet {
        &self.fields_set
    }

    fn field_value(&self, name: &str, options: &SerializeOptions) -> Result<Option<Value>> {
        let value = match name {
            "display" => self.display.to_value(options)?,
            "position" => self.position.to_value(options)?,
            "full_width" => self.full_width.to_value(options)?,
            "reverse" => self.reverse.to_value(options)?,
            "labels" => self.labels.to_value(options)?,
            other => return Err(Error::unsupported_field(Self::NAME, other)),
        };
        Ok(Some(value))
    }

    fn from_input(input: &mut FieldInput<'_, Self>) -> Result<Self> {
        let defaults = Legend::default();
        Ok(Legend {
            display: input.or_default("display", defaults.display)?,
            position: input.or_default("position", defaults.position)?,
            full_width: input.or_default("full_width", defaults.full_width)?,
            reverse: input.or_default("reverse", defaults.reverse)?,
            labels: input.or_default("labels", defaults.labels)?,
            fields_set: input.finish(),
        })
    }
}

impl_model_serde!(Title, LegendLabel, Legend);

/// A value in the plugins mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Plugin {
    Legend(Legend),
    Title(Title),
}

impl Plugin {
    #[must_use]
    pub fn as_legend(&self) -> Option<&Legend> {
        match self {
            Plugin::Legend(legend) => Some(legend),
            Plugin::Title(_) => None,
        }
    }

    #[must_use]
    pub fn as_title(&self) -> Option<&Title> {
        match self {
            Plugin::Title(title) => Some(title),
            Plugin::Legend(_) => None,
        }
    }

    fn is_title(&self) -> bool {
        matches!(self, Plugin::Title(_))
    }

    /// The field that identifies this plugin's type on its own.
    fn marker(&self) -> (&'static str, Value) {
        match self {
            Plugin::Legend(legend) => ("fullWidth", Value::Bool(legend.full_width())),
            Plugin::Title(title) => ("text", Value::String(title.text().to_string())),
        }
    }

    /// Validates one entry of a plugins object.
    ///
    /// Title-only fields select [`Title`] and legend-only fields select
    /// [`Legend`], whatever the key. When only shared fields are present the
    /// key decides: `title` reads as a [`Title`], anything else as a
    /// [`Legend`].
    fn from_entry(key: &str, value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(Error::invalid_plugin_value(key, &describe(value)));
        };
        let plugin = if reads_as_title(key, object)? {
            construct::<Title>(value).map(Plugin::Title)
        } else {
            construct::<Legend>(value).map(Plugin::Legend)
        };
        plugin.map_err(|e| Error::element_for_key(key, e))
    }
}

fn reads_as_title(key: &str, object: &Map) -> Result<bool> {
    let legend_only = object
        .keys()
        .any(|k| Legend::field(k).is_some() && Title::field(k).is_none());
    let title_only = object
        .keys()
        .any(|k| Title::field(k).is_some() && Legend::field(k).is_none());
    match (legend_only, title_only) {
        (true, true) => Err(Error::invalid_plugin_value(
            key,
            "an object mixing legend and title fields",
        )),
        (false, true) => Ok(true),
        (true, false) => Ok(false),
        (false, false) => Ok(key == "title"),
    }
}

impl From<Legend> for Plugin {
    fn from(legend: Legend) -> Self {
        Plugin::Legend(legend)
    }
}

impl From<Title> for Plugin {
    fn from(title: Title) -> Self {
        Plugin::Title(title)
    }
}

impl ToValue for Plugin {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        match self {
            Plugin::Legend(legend) => legend.to_value(options),
            Plugin::Title(title) => title.to_value(options),
        }
    }
}

/// Mapping from plugin name to its configuration.
///
/// Keys are chosen by the caller, conventionally `legend` and `title`.
/// Entries serialize in insertion order; equality ignores order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plugins(IndexMap<String, Plugin>);

impl Plugins {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a plugin, returning the previous entry.
    pub fn insert(&mut self, key: impl Into<String>, plugin: impl Into<Plugin>) -> Option<Plugin> {
        self.0.insert(key.into(), plugin.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Plugin> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Plugin> {
        self.0.iter()
    }
}

impl<K: Into<String>, P: Into<Plugin>> FromIterator<(K, P)> for Plugins {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Plugins(
            iter.into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }
}

impl ToValue for Plugins {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        let mut map = Map::with_capacity(self.0.len());
        for (key, plugin) in &self.0 {
            let mut value = plugin.to_value(options)?;
            // pruning can leave only shared fields; the entry must still
            // read back as the same type under its key
            if let Value::Object(object) = &mut value {
                if reads_as_title(key, object)? != plugin.is_title() {
                    let (alias, marker) = plugin.marker();
                    object.insert(alias.to_string(), marker);
                }
            }
            map.insert(key.clone(), value);
        }
        Ok(Value::Object(map))
    }
}

impl FromValue for Plugins {
    fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::schema("plugins object", &describe(value)))?;
        let mut plugins = IndexMap::with_capacity(object.len());
        for (key, entry) in object {
            plugins.insert(key.clone(), Plugin::from_entry(key, entry)?);
        }
        Ok(Plugins(plugins))
    }
}

impl Serialize for Plugins {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = self
            .to_value(&SerializeOptions::default())
            .map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Plugins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Plugins::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serialize, value};

    #[test]
    fn test_legend_label_defaults() {
        let label = LegendLabel::new();
        assert_eq!(label.box_width(), 40);
        assert_eq!(label.padding(), 10);
        assert_eq!(label.filter(), None);
        assert_eq!(label.font_size(), 12);
        assert_eq!(label.font_style(), "normal");
        assert_eq!(label.font_color(), Color::parse("#666").unwrap());
        assert!(!label.use_point_style());
        assert_eq!(serialize(&label).unwrap(), value!({}));
    }

    #[test]
    fn test_legend_label_custom_values() {
        let label = LegendLabel::new()
            .with_box_width(50)
            .with_padding(20)
            .with_filter("custom")
            .with_font_size(16)
            .with_font_style("italic")
            .with_font_color(Color::parse("#123456").unwrap())
            .with_use_point_style(true);
        assert_eq!(label.box_width(), 50);
        assert_eq!(label.filter(), Some(&"custom".to_string()));
        assert_eq!(label.font_style(), "italic");
        assert_eq!(label.font_color(), Color::from((0x12, 0x34, 0x56)));
        assert!(label.use_point_style());
    }

    #[test]
    fn test_legend_label_excludes_defaults() {
        let label = LegendLabel::new()
            .with_font_color(Color::parse("red").unwrap())
            .with_use_point_style(true);
        assert_eq!(
            serialize(&label).unwrap(),
            value!({ "fontColor": "#ff0000", "usePointStyle": true })
        );
    }

    #[test]
    fn test_plugin_keys_select_type() {
        let plugins = Plugins::from_value(&value!({
            "legend": { "position": "bottom" },
            "title": { "display": false }
        }))
        .unwrap();
        let legend = plugins.get("legend").and_then(Plugin::as_legend).unwrap();
        assert_eq!(legend.position(), Position::Bottom);
        let title = plugins.get("title").and_then(Plugin::as_title).unwrap();
        assert!(!title.display());
    }

    #[test]
    fn test_plugin_inferred_from_fields() {
        let plugins = Plugins::from_value(&value!({
            "heading": { "text": "Sales" },
            "key": { "fullWidth": false },
            "bare": {}
        }))
        .unwrap();
        assert!(plugins.get("heading").and_then(Plugin::as_title).is_some());
        assert!(plugins.get("key").and_then(Plugin::as_legend).is_some());
        assert!(plugins.get("bare").and_then(Plugin::as_legend).is_some());
    }

    #[test]
    fn test_fields_outrank_the_key() {
        let plugins = Plugins::from_value(&value!({
            "legend": { "text": "Weekly", "display": true },
            "title": { "reverse": true }
        }))
        .unwrap();
        let title = plugins.get("legend").and_then(Plugin::as_title).unwrap();
        assert_eq!(title.text(), "Weekly");
        assert!(plugins.get("title").and_then(Plugin::as_legend).unwrap().reverse());
    }

    #[test]
    fn test_shared_fields_fall_back_to_the_key() {
        let plugins = Plugins::from_value(&value!({
            "title": { "position": "left" },
            "heading": { "position": "left" }
        }))
        .unwrap();
        assert!(plugins.get("title").and_then(Plugin::as_title).is_some());
        assert!(plugins.get("heading").and_then(Plugin::as_legend).is_some());
    }

    #[test]
    fn test_ambiguous_entries_keep_their_type() {
        let mut plugins = Plugins::new();
        plugins.insert("heading", Title::new().with_display(false));
        plugins.insert("title", Legend::new());
        plugins.insert("legend", Legend::new().with_display(false));
        assert_eq!(
            serialize(&plugins).unwrap(),
            value!({
                "heading": { "display": false, "text": "My Chart" },
                "title": { "fullWidth": true },
                "legend": { "display": false }
            })
        );

        let back = Plugins::from_value(&serialize(&plugins).unwrap()).unwrap();
        assert_eq!(back, plugins);
    }

    #[test]
    fn test_invalid_plugin_values() {
        let err = Plugins::from_value(&value!({ "legend": "top" })).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_plugin_value("legend", "string \"top\"")
        );

        let err = Plugins::from_value(&value!({ "odd": { "text": "a", "reverse": true } }))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPluginValue { .. }));
    }

    #[test]
    fn test_plugin_field_errors_name_the_key() {
        let err = Plugins::from_value(&value!({ "title": { "padding": "wide" } })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid element at key \"title\": Invalid value for field 'padding': \
             expected integer, found string \"wide\""
        );
    }
}
