//! Normalized color values.
//!
//! A [`Color`] can be built from any of the spellings Chart.js users reach for:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - CSS named colors: `red`, `steelblue`, `RebeccaPurple` (case-insensitive)
//! - functional notation: `rgb(255, 0, 0)`, `rgba(0, 0, 0, 0.1)`
//! - numeric tuples: `(255, 0, 0)` or `[0, 0, 0, 0.1]`
//!
//! Every color normalizes to 8-bit RGBA channels. The canonical wire form is
//! lowercase hex: `#rrggbb` when opaque, `#rrggbbaa` otherwise. Two colors are
//! equal exactly when their canonical forms are equal.
//!
//! ```rust
//! use chartjs_schema::Color;
//!
//! let red = Color::parse("red").unwrap();
//! assert_eq!(red, Color::parse("#ff0000").unwrap());
//! assert_eq!(red, Color::from((255, 0, 0)));
//! assert_eq!(red.to_string(), "#ff0000");
//!
//! let shade = Color::parse("rgba(0, 0, 0, 0.1)").unwrap();
//! assert_eq!(shade.as_hex(), "#0000001a");
//! assert_eq!(shade.as_rgb_string(), "rgba(0, 0, 0, 0.1)");
//! ```

use crate::model::{FromValue, ToValue};
use crate::value::describe;
use crate::{Error, Result, SerializeOptions, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with an 8-bit alpha channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// `#666666`, the Chart.js default font color.
    pub const DEFAULT_FONT: Color = Color::from_rgb(0x66, 0x66, 0x66);

    /// `rgba(0, 0, 0, 0.1)`, the Chart.js default fill and border color.
    pub const DEFAULT_FILL: Color = Color::from_rgba8(0, 0, 0, 26);

    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Creates a color with a fractional alpha in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if `alpha` is outside `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::Color;
    ///
    /// assert!(Color::from_rgba(0, 0, 0, 0.5).is_ok());
    /// assert!(Color::from_rgba(0, 0, 0, 1.5).is_err());
    /// ```
    pub fn from_rgba(r: u8, g: u8, b: u8, alpha: f64) -> Result<Self> {
        let a = alpha_to_u8(alpha).ok_or_else(|| {
            let shown = format!("({}, {}, {}, {})", r, g, b, alpha);
            Error::invalid_color(&shown, "alpha must be in [0, 1]")
        })?;
        Ok(Color { r, g, b, a })
    }

    /// Creates a color from three or four numeric components.
    ///
    /// `r`, `g` and `b` must lie in `[0, 255]` and are rounded to integers;
    /// the optional alpha must lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a wrong component count or an
    /// out-of-range component.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartjs_schema::Color;
    ///
    /// let color = Color::from_components(&[0.0, 128.0, 255.0]).unwrap();
    /// assert_eq!(color.as_hex(), "#0080ff");
    /// assert!(Color::from_components(&[256.0, 0.0, 0.0]).is_err());
    /// assert!(Color::from_components(&[1.0, 2.0]).is_err());
    /// ```
    pub fn from_components(components: &[f64]) -> Result<Self> {
        let shown = || {
            let parts: Vec<String> = components.iter().map(|c| c.to_string()).collect();
            format!("({})", parts.join(", "))
        };
        let (rgb, alpha) = match components {
            [r, g, b] => ([*r, *g, *b], None),
            [r, g, b, a] => ([*r, *g, *b], Some(*a)),
            _ => {
                return Err(Error::invalid_color(
                    &shown(),
                    "expected 3 or 4 components",
                ))
            }
        };
        let mut channels = [0u8; 3];
        for (slot, component) in channels.iter_mut().zip(rgb) {
            *slot = channel_to_u8(component).ok_or_else(|| {
                Error::invalid_color(&shown(), "color channels must be in [0, 255]")
            })?;
        }
        let a = match alpha {
            Some(alpha) => alpha_to_u8(alpha)
                .ok_or_else(|| Error::invalid_color(&shown(), "alpha must be in [0, 1]"))?,
            None => 255,
        };
        Ok(Color {
            r: channels[0],
            g: channels[1],
            b: channels[2],
            a,
        })
    }

    /// Parses a hex, named, or `rgb()`/`rgba()` color string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string matches no known format.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim().to_ascii_lowercase();
        if let Some(digits) = text.strip_prefix('#') {
            return parse_hex(digits).ok_or_else(|| {
                Error::invalid_color(input, "hex colors need 3, 4, 6 or 8 hex digits")
            });
        }
        if let Some(args) = functional_args(&text) {
            let components = args
                .split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| Error::invalid_color(input, "rgb() components must be numbers"))?;
            return Self::from_components(&components)
                .map_err(|_| Error::invalid_color(input, "rgb() components out of range"));
        }
        named_lookup(&text).ok_or_else(|| Error::invalid_color(input, "not a known color name"))
    }

    #[must_use]
    pub const fn red(&self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn green(&self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.b
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Canonical form: `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    #[must_use]
    pub fn as_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// `rgb(r, g, b)` when opaque, otherwise `rgba(r, g, b, a)` with alpha
    /// rounded to two decimals.
    #[must_use]
    pub fn as_rgb_string(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.alpha() * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }

    /// The CSS keyword for this color, if it is opaque and has one.
    ///
    /// Where two keywords share a value (`gray`/`grey`), the first in
    /// alphabetical order is returned.
    #[must_use]
    pub fn as_named(&self) -> Option<&'static str> {
        if !self.is_opaque() {
            return None;
        }
        let rgb = u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b);
        NAMED_COLORS
            .iter()
            .find(|(_, value)| *value == rgb)
            .map(|(name, _)| *name)
    }
}

fn channel_to_u8(component: f64) -> Option<u8> {
    if (0.0..=255.0).contains(&component) {
        Some(component.round() as u8)
    } else {
        None
    }
}

fn alpha_to_u8(alpha: f64) -> Option<u8> {
    if (0.0..=1.0).contains(&alpha) {
        Some((alpha * 255.0).round() as u8)
    } else {
        None
    }
}

fn parse_hex(digits: &str) -> Option<Color> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => Some(Color::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Color::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn functional_args(text: &str) -> Option<&str> {
    let inner = text
        .strip_prefix("rgba(")
        .or_else(|| text.strip_prefix("rgb("))?;
    inner.strip_suffix(')')
}

fn named_lookup(name: &str) -> Option<Color> {
    NAMED_COLORS
        .binary_search_by(|(candidate, _)| candidate.cmp(&name))
        .ok()
        .map(|index| {
            let rgb = NAMED_COLORS[index].1;
            Color::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
        })
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::from_rgb(r, g, b)
    }
}

impl TryFrom<(u8, u8, u8, f64)> for Color {
    type Error = Error;

    fn try_from((r, g, b, a): (u8, u8, u8, f64)) -> Result<Self> {
        Color::from_rgba(r, g, b, a)
    }
}

impl ToValue for Color {
    fn to_value(&self, _options: &SerializeOptions) -> Result<Value> {
        Ok(Value::String(self.as_hex()))
    }
}

impl FromValue for Color {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Color::parse(s),
            Value::Array(items) => {
                let components = items
                    .iter()
                    .map(Value::as_f64)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        Error::invalid_color(&value.to_string(), "tuple components must be numbers")
                    })?;
                Color::from_components(&components)
            }
            other => Err(Error::invalid_color(
                &describe(other),
                "expected a color string or a numeric tuple",
            )),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Color::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// CSS Color Module Level 4 named colors, sorted by name for binary search.
static NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_equivalent_spellings() {
        let red = Color::parse("#ff0000").unwrap();
        assert_eq!(Color::parse("red").unwrap(), red);
        assert_eq!(Color::parse("RED").unwrap(), red);
        assert_eq!(Color::parse("#f00").unwrap(), red);
        assert_eq!(Color::parse("#FF0000FF").unwrap(), red);
        assert_eq!(Color::parse("rgb(255, 0, 0)").unwrap(), red);
        assert_eq!(Color::from((255, 0, 0)), red);
    }

    #[test]
    fn test_short_hex_with_alpha() {
        let color = Color::parse("#0008").unwrap();
        assert_eq!(color.as_hex(), "#00000088");
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(Color::parse("#666").unwrap(), Color::DEFAULT_FONT);
        assert_eq!(Color::from_rgba(0, 0, 0, 0.1).unwrap(), Color::DEFAULT_FILL);
        assert_eq!(Color::DEFAULT_FILL.as_hex(), "#0000001a");
        assert_eq!(Color::DEFAULT_FONT.as_hex(), "#666666");
    }

    #[test]
    fn test_invalid_inputs() {
        for input in ["", "#12", "#12345", "#ggg", "#+ff", "blurple", "rgb(1, 2)", "rgb(300, 0, 0)", "rgba(0, 0, 0, 2)"] {
            let err = Color::parse(input).unwrap_err();
            assert!(matches!(err, Error::InvalidColor { .. }), "{input}");
        }
    }

    #[test]
    fn test_rgb_string_rounds_alpha() {
        let color = Color::from_rgba(10, 20, 30, 0.333).unwrap();
        assert_eq!(color.as_rgb_string(), "rgba(10, 20, 30, 0.33)");
        assert_eq!(Color::from_rgb(1, 2, 3).as_rgb_string(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_as_named() {
        assert_eq!(Color::parse("#808080").unwrap().as_named(), Some("gray"));
        assert_eq!(Color::parse("#123456").unwrap().as_named(), None);
        assert_eq!(Color::DEFAULT_FILL.as_named(), None);
    }

    #[test]
    fn test_from_value_tuple() {
        let value = Value::Array(vec![Value::from(0), Value::from(0), Value::from(0), Value::from(0.1)]);
        assert_eq!(Color::from_value(&value).unwrap(), Color::DEFAULT_FILL);

        let value = Value::Array(vec![Value::from("a"), Value::from(0), Value::from(0)]);
        assert!(matches!(Color::from_value(&value), Err(Error::InvalidColor { .. })));

        assert!(matches!(Color::from_value(&Value::Bool(true)), Err(Error::InvalidColor { .. })));
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let color = Color::parse("steelblue").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#4682b4\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
