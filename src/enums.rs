//! Closed enumerations with fixed wire values.
//!
//! - [`ChartType`]: the chart kind, emitted as the root `type` key
//! - [`Position`]: placement of titles and legends
//!
//! Wire values are constants. Parsing accepts either the wire value or the
//! tag name in any case, with or without underscores.
//!
//! ```rust
//! use chartjs_schema::{ChartType, Position};
//!
//! assert_eq!(ChartType::PolarArea.as_str(), "polarArea");
//! assert_eq!("POLAR_AREA".parse::<ChartType>().unwrap(), ChartType::PolarArea);
//! assert_eq!(ChartType::Mixed.as_str(), "bar");
//! assert_eq!("left".parse::<Position>().unwrap(), Position::Left);
//! ```

use crate::model::{FromValue, ToValue};
use crate::value::describe;
use crate::{Error, Result, SerializeOptions, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The kind of chart to draw.
///
/// `Mixed` is an alias: its wire value is `"bar"`, the base type Chart.js
/// expects for mixed charts, and it compares equal to [`ChartType::Bar`].
///
/// # Examples
///
/// ```rust
/// use chartjs_schema::ChartType;
///
/// assert_eq!(ChartType::default(), ChartType::Bar);
/// assert_eq!(ChartType::Mixed, ChartType::Bar);
/// assert_eq!(ChartType::Mixed.name(), "MIXED");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub enum ChartType {
    Line,
    #[default]
    Bar,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
    HorizontalBar,
    Mixed,
    Bubble,
}

impl ChartType {
    /// Every tag, in declaration order.
    pub const ALL: [ChartType; 9] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Pie,
        ChartType::Doughnut,
        ChartType::Radar,
        ChartType::PolarArea,
        ChartType::HorizontalBar,
        ChartType::Mixed,
        ChartType::Bubble,
    ];

    /// The wire value emitted in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar | ChartType::Mixed => "bar",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Radar => "radar",
            ChartType::PolarArea => "polarArea",
            ChartType::HorizontalBar => "horizontalBar",
            ChartType::Bubble => "bubble",
        }
    }

    /// The tag name, in upper snake case.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ChartType::Line => "LINE",
            ChartType::Bar => "BAR",
            ChartType::Pie => "PIE",
            ChartType::Doughnut => "DOUGHNUT",
            ChartType::Radar => "RADAR",
            ChartType::PolarArea => "POLAR_AREA",
            ChartType::HorizontalBar => "HORIZONTAL_BAR",
            ChartType::Mixed => "MIXED",
            ChartType::Bubble => "BUBBLE",
        }
    }
}

impl PartialEq for ChartType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ChartType {}

impl Hash for ChartType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl FromStr for ChartType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // exact wire match first so "bar" resolves to Bar, not Mixed
        if let Some(found) = ChartType::ALL.iter().find(|t| t.as_str() == s) {
            return Ok(*found);
        }
        let wanted = fold_tag(s);
        ChartType::ALL
            .iter()
            .find(|t| fold_tag(t.name()) == wanted)
            .copied()
            .ok_or_else(|| Error::unknown_enum_value("ChartType", s))
    }
}

/// Placement of a title or legend around the chart area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    #[default]
    Top,
    Left,
    Bottom,
    Right,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Top,
        Position::Left,
        Position::Bottom,
        Position::Right,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Left => "left",
            Position::Bottom => "bottom",
            Position::Right => "right",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Position::Top => "TOP",
            Position::Left => "LEFT",
            Position::Bottom => "BOTTOM",
            Position::Right => "RIGHT",
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = fold_tag(s);
        Position::ALL
            .iter()
            .find(|p| p.as_str() == s || fold_tag(p.name()) == wanted)
            .copied()
            .ok_or_else(|| Error::unknown_enum_value("Position", s))
    }
}

/// Case- and underscore-insensitive form of a tag, so that `POLAR_AREA`,
/// `polar_area` and `polarArea` all compare equal.
fn fold_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! wire_enum_impls {
    ($($ty:ident),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl ToValue for $ty {
                fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
                    Ok(Value::from(self.as_str()))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::String(s) => s.parse(),
                        other => Err(Error::unknown_enum_value(stringify!($ty), &describe(other))),
                    }
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

wire_enum_impls!(ChartType, Position);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::to_camel_case;

    #[test]
    fn test_wire_values_are_camel_case_tags() {
        for chart_type in ChartType::ALL {
            if chart_type.name() == "MIXED" {
                continue;
            }
            assert_eq!(chart_type.as_str(), to_camel_case(&chart_type.name().to_lowercase()));
        }
    }

    #[test]
    fn test_mixed_is_bar_on_the_wire() {
        let options = SerializeOptions::new();
        assert_eq!(
            ChartType::Mixed.to_value(&options).unwrap(),
            ChartType::Bar.to_value(&options).unwrap()
        );
        assert_eq!("bar".parse::<ChartType>().unwrap().name(), "BAR");
        assert_eq!("mixed".parse::<ChartType>().unwrap().name(), "MIXED");
    }

    #[test]
    fn test_parse_accepts_tag_spellings() {
        for input in ["horizontalBar", "HORIZONTAL_BAR", "horizontal_bar"] {
            assert_eq!(input.parse::<ChartType>().unwrap(), ChartType::HorizontalBar);
        }
        assert_eq!("BOTTOM".parse::<Position>().unwrap(), Position::Bottom);
    }

    #[test]
    fn test_unknown_values() {
        let err = "scatterplot".parse::<ChartType>().unwrap_err();
        assert_eq!(err, Error::unknown_enum_value("ChartType", "scatterplot"));

        let err = Position::from_value(&Value::from(3)).unwrap_err();
        assert!(matches!(err, Error::UnknownEnumValue { kind: "Position", .. }));
    }
}
