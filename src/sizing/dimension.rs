//! Dimension tokens and their parsed form.
//!
//! A single width or height is written in one of three grammars:
//!
//! | Token | Unit | Value |
//! |---|---|---|
//! | `320`, `320px` | [`Unit::Pixel`] | `320` (natural number, no decimals) |
//! | `0.5x`, `2x` | [`Unit::Factor`] | `0.5`, `2` |
//! | `50%`, `50pc` | [`Unit::Factor`] | `0.5` (divided by 100) |
//!
//! Absent, `null` and empty tokens are [`Unit::Unspecified`]; anything else is
//! [`Unit::Invalid`]. Parsing is total: it never fails, it classifies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of a parsed dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Absolute pixels.
    Pixel,
    /// Relative to the real axis: `effective = value * real`.
    Factor,
    /// Not given. The other axis decides.
    Unspecified,
    /// Given but unparseable. Never used in arithmetic.
    Invalid,
}

impl Unit {
    /// Wire name in the structured `{unit, value}` form.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Unit::Pixel => Some("px"),
            Unit::Factor => Some("x"),
            Unit::Unspecified | Unit::Invalid => None,
        }
    }
}

/// A width or height after parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub unit: Unit,
    pub value: Option<f64>,
}

impl Dimension {
    pub const UNSPECIFIED: Self = Self {
        unit: Unit::Unspecified,
        value: None,
    };

    pub const INVALID: Self = Self {
        unit: Unit::Invalid,
        value: None,
    };

    pub const fn pixel(value: f64) -> Self {
        Self {
            unit: Unit::Pixel,
            value: Some(value),
        }
    }

    pub const fn factor(value: f64) -> Self {
        Self {
            unit: Unit::Factor,
            value: Some(value),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        self.unit == Unit::Unspecified
    }

    pub fn is_invalid(&self) -> bool {
        self.unit == Unit::Invalid
    }

    /// Express this dimension as a fraction of `real`.
    ///
    /// `None` for unspecified and invalid dimensions.
    pub fn relative(&self, real: f64) -> Option<f64> {
        match (self.unit, self.value) {
            (Unit::Factor, Some(v)) => Some(v),
            (Unit::Pixel, Some(v)) => Some(v / real),
            _ => None,
        }
    }

    /// Express this dimension in absolute pixels against `real`.
    ///
    /// `None` for unspecified and invalid dimensions.
    pub fn absolute(&self, real: f64) -> Option<f64> {
        match (self.unit, self.value) {
            (Unit::Factor, Some(v)) => Some(v * real),
            (Unit::Pixel, Some(v)) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.unit, self.value) {
            (Unit::Pixel, Some(v)) => write!(f, "{v}px"),
            (Unit::Factor, Some(v)) => write!(f, "{v}x"),
            (Unit::Invalid, _) => f.write_str("invalid"),
            _ => f.write_str("unspecified"),
        }
    }
}

/// The structured `{unit, value}` form of a dimension.
///
/// This is what a custom step produces when it wants to hand back an already
/// split dimension instead of a token string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredDimension {
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A dimension as written by the user, before parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDimension {
    Integer(u64),
    Float(f64),
    Text(String),
    Structured(StructuredDimension),
}

impl RawDimension {
    /// Token text, as used in diagnostics.
    pub fn display_text(&self) -> String {
        match self {
            RawDimension::Integer(n) => n.to_string(),
            RawDimension::Float(n) => n.to_string(),
            RawDimension::Text(s) => s.clone(),
            RawDimension::Structured(s) => match (&s.unit, s.value) {
                (Some(u), Some(v)) => format!("{v}{u}"),
                (None, Some(v)) => v.to_string(),
                _ => "null".to_string(),
            },
        }
    }
}

impl From<Dimension> for RawDimension {
    fn from(dim: Dimension) -> Self {
        RawDimension::Structured(StructuredDimension {
            unit: dim.unit.symbol().map(str::to_string),
            value: dim.value.filter(|_| dim.unit.symbol().is_some()),
        })
    }
}

impl From<&str> for RawDimension {
    fn from(token: &str) -> Self {
        RawDimension::Text(token.to_string())
    }
}

impl From<u32> for RawDimension {
    fn from(px: u32) -> Self {
        RawDimension::Integer(px as u64)
    }
}

/// Parse an optional raw dimension. Absent means unspecified.
pub fn parse(raw: Option<&RawDimension>) -> Dimension {
    match raw {
        None => Dimension::UNSPECIFIED,
        Some(RawDimension::Integer(n)) => parse_token(&n.to_string()),
        Some(RawDimension::Float(n)) => parse_token(&n.to_string()),
        Some(RawDimension::Text(s)) => parse_token(s),
        Some(RawDimension::Structured(s)) => parse_structured(s),
    }
}

fn parse_structured(dim: &StructuredDimension) -> Dimension {
    let Some(value) = dim.value else {
        return Dimension::UNSPECIFIED;
    };
    match dim.unit.as_deref() {
        Some("px") => Dimension::pixel(value),
        Some("x") => Dimension::factor(value),
        _ => Dimension::INVALID,
    }
}

/// Classify and parse a single token string.
///
/// Grammars are tried in order: pixel, factor, percent.
pub fn parse_token(token: &str) -> Dimension {
    if token.is_empty() {
        return Dimension::UNSPECIFIED;
    }
    if let Some(px) = parse_pixel(token) {
        return Dimension::pixel(px);
    }
    if let Some(v) = token.strip_suffix('x').and_then(parse_decimal) {
        return Dimension::factor(v);
    }
    let percent = token
        .strip_suffix('%')
        .or_else(|| token.strip_suffix("pc"))
        .and_then(parse_decimal);
    if let Some(v) = percent {
        return Dimension::factor(v / 100.0);
    }
    Dimension::INVALID
}

/// `[0-9]+(px)?`
fn parse_pixel(token: &str) -> Option<f64> {
    let digits = token.strip_suffix("px").unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// `[0-9]*\.?[0-9]+`: optional integer part, optional point, mandatory
/// trailing digits. No sign, no exponent.
fn parse_decimal(text: &str) -> Option<f64> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => ("", text),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if frac_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Dimension {
        parse(Some(&RawDimension::from(s)))
    }

    // =========================================================================
    // Pixel grammar
    // =========================================================================

    #[test]
    fn bare_natural_number_is_pixel() {
        assert_eq!(text("320"), Dimension::pixel(320.0));
    }

    #[test]
    fn px_suffix_is_pixel() {
        assert_eq!(text("320px"), Dimension::pixel(320.0));
    }

    #[test]
    fn zero_is_pixel_not_unspecified() {
        assert_eq!(text("0"), Dimension::pixel(0.0));
        assert_eq!(parse(Some(&RawDimension::Integer(0))), Dimension::pixel(0.0));
    }

    #[test]
    fn decimal_pixels_are_invalid() {
        assert!(text("320.5").is_invalid());
        assert!(text("320.5px").is_invalid());
    }

    #[test]
    fn integer_token_is_pixel() {
        assert_eq!(parse(Some(&RawDimension::Integer(100))), Dimension::pixel(100.0));
    }

    #[test]
    fn integral_float_token_is_pixel() {
        assert_eq!(parse(Some(&RawDimension::Float(100.0))), Dimension::pixel(100.0));
    }

    #[test]
    fn fractional_float_token_is_invalid() {
        assert!(parse(Some(&RawDimension::Float(0.5))).is_invalid());
    }

    // =========================================================================
    // Factor and percent grammars
    // =========================================================================

    #[test]
    fn factor_suffix() {
        assert_eq!(text("0.5x"), Dimension::factor(0.5));
        assert_eq!(text("2x"), Dimension::factor(2.0));
        assert_eq!(text(".25x"), Dimension::factor(0.25));
    }

    #[test]
    fn percent_suffixes_divide_by_hundred() {
        assert_eq!(text("50%"), Dimension::factor(0.5));
        assert_eq!(text("50pc"), Dimension::factor(0.5));
        assert_eq!(text("12.5%"), Dimension::factor(0.125));
    }

    #[test]
    fn trailing_point_is_invalid() {
        assert!(text("5.x").is_invalid());
        assert!(text("5.%").is_invalid());
    }

    #[test]
    fn uppercase_factor_suffix_is_invalid() {
        assert!(text("2X").is_invalid());
    }

    #[test]
    fn sign_and_garbage_are_invalid() {
        assert!(text("-5").is_invalid());
        assert!(text("-0.5x").is_invalid());
        assert!(text("abc").is_invalid());
        assert!(text("px").is_invalid());
        assert!(text("x").is_invalid());
        assert!(text(" 5").is_invalid());
    }

    // =========================================================================
    // Unspecified and structured input
    // =========================================================================

    #[test]
    fn absent_and_empty_are_unspecified() {
        assert!(parse(None).is_unspecified());
        assert!(text("").is_unspecified());
    }

    #[test]
    fn structured_passes_through() {
        let px = RawDimension::Structured(StructuredDimension {
            unit: Some("px".into()),
            value: Some(12.5),
        });
        assert_eq!(parse(Some(&px)), Dimension::pixel(12.5));

        let x = RawDimension::Structured(StructuredDimension {
            unit: Some("x".into()),
            value: Some(0.3),
        });
        assert_eq!(parse(Some(&x)), Dimension::factor(0.3));
    }

    #[test]
    fn structured_null_value_is_unspecified() {
        let raw = RawDimension::Structured(StructuredDimension {
            unit: Some("px".into()),
            value: None,
        });
        assert!(parse(Some(&raw)).is_unspecified());
    }

    #[test]
    fn structured_unknown_unit_is_invalid() {
        let raw = RawDimension::Structured(StructuredDimension {
            unit: Some("em".into()),
            value: Some(2.0),
        });
        assert!(parse(Some(&raw)).is_invalid());
    }

    #[test]
    fn dimension_into_raw_reparses_identically() {
        for dim in [Dimension::pixel(66.5), Dimension::factor(0.25)] {
            assert_eq!(parse(Some(&RawDimension::from(dim))), dim);
        }
        assert!(parse(Some(&RawDimension::from(Dimension::UNSPECIFIED))).is_unspecified());
    }

    // =========================================================================
    // Arithmetic helpers
    // =========================================================================

    #[test]
    fn relative_and_absolute() {
        assert_eq!(Dimension::pixel(100.0).relative(200.0), Some(0.5));
        assert_eq!(Dimension::factor(0.5).relative(200.0), Some(0.5));
        assert_eq!(Dimension::pixel(100.0).absolute(200.0), Some(100.0));
        assert_eq!(Dimension::factor(0.5).absolute(200.0), Some(100.0));
        assert_eq!(Dimension::UNSPECIFIED.relative(200.0), None);
        assert_eq!(Dimension::INVALID.absolute(200.0), None);
    }

    #[test]
    fn deserialize_raw_dimension_variants() {
        let v: RawDimension = serde_json::from_str("100").unwrap();
        assert_eq!(v, RawDimension::Integer(100));
        let v: RawDimension = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, RawDimension::Float(0.5));
        let v: RawDimension = serde_json::from_str("\"50%\"").unwrap();
        assert_eq!(v, RawDimension::Text("50%".into()));
        let v: RawDimension = serde_json::from_str(r#"{"unit":"x","value":0.5}"#).unwrap();
        assert_eq!(parse(Some(&v)), Dimension::factor(0.5));
    }
}
