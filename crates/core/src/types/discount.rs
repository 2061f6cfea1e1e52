//! Percentage discount shown on product cards.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error for a discount outside `0..=100`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("discount must be between 0 and 100, got {0}")]
pub struct DiscountError(pub i64);

/// Whole-number discount percentage, `0..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const NONE: Self = Self(0);

    /// Create a discount from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError`] if the percentage is outside `0..=100`.
    pub fn new(percent: i64) -> Result<Self, DiscountError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(DiscountError(percent))
    }

    /// Create a discount, capping anything above 100%.
    #[must_use]
    pub const fn clamped(percent: u8) -> Self {
        if percent > 100 { Self(100) } else { Self(percent) }
    }

    /// The percentage value.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Returns `true` if there is any discount at all.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<i64> for Discount {
    type Error = DiscountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Discount> for u8 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Discount::new(0).unwrap(), Discount::NONE);
        assert_eq!(Discount::new(100).unwrap().percent(), 100);
        assert_eq!(Discount::new(101), Err(DiscountError(101)));
        assert_eq!(Discount::new(-1), Err(DiscountError(-1)));
    }

    #[test]
    fn test_display_and_active() {
        let discount = Discount::new(15).unwrap();
        assert_eq!(discount.to_string(), "15%");
        assert!(discount.is_active());
        assert!(!Discount::NONE.is_active());
    }

    #[test]
    fn test_serde() {
        let discount: Discount = serde_json::from_str("13").unwrap();
        assert_eq!(discount.percent(), 13);
        assert!(serde_json::from_str::<Discount>("250").is_err());
        assert_eq!(serde_json::to_string(&discount).unwrap(), "13");
    }
}
