//! Hex color type used for product and category swatches.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input is not exactly six characters long.
    #[error("color must have 6 hex digits, got {0}")]
    Length(usize),
    /// The input contains a character outside `0-9A-F`.
    #[error("color contains a non-hex character: {0:?}")]
    NonHex(char),
}

/// A six-digit RGB color without the leading `#`, normalized to uppercase.
///
/// ```
/// use food_delivery_core::HexColor;
///
/// assert_eq!(HexColor::parse("#f44336").unwrap().as_str(), "F44336");
/// assert!(HexColor::parse("F443").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Swatch used when a product has no color of its own.
    pub const DEFAULT: &'static str = "F5F5F5";

    /// Parse a color, accepting an optional leading `#` and either case.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not six hex digits.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        let count = digits.chars().count();
        if count != 6 {
            return Err(ColorError::Length(count));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::NonHex(bad));
        }
        Ok(Self(digits.to_ascii_uppercase()))
    }

    /// Returns the color digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(HexColor::parse("e53935").unwrap().as_str(), "E53935");
        assert_eq!(HexColor::parse(" #00897b ").unwrap().as_str(), "00897B");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(HexColor::parse("FFF"), Err(ColorError::Length(3)));
        assert_eq!(HexColor::parse("GGGGGG"), Err(ColorError::NonHex('G')));
    }

    #[test]
    fn test_default_swatch() {
        assert_eq!(HexColor::default().as_str(), "F5F5F5");
    }

    #[test]
    fn test_serde_validates() {
        let color: HexColor = serde_json::from_str("\"c2185b\"").unwrap();
        assert_eq!(color.as_str(), "C2185B");
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"C2185B\"");
    }
}
