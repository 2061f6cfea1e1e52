//! Customer rating on a 0 to 5 scale.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error for a rating outside `0..=5`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("rating must be between 0 and 5, got {0}")]
pub struct RatingError(pub Decimal);

/// Average rating, one decimal place is what the catalog uses (`4.8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(Decimal);

impl Rating {
    const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if the value is outside `0..=5`.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(RatingError(value));
        }
        Ok(Self(value))
    }

    /// Create a rating from tenths (`48` is `4.8`).
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if the value is above `50`.
    pub fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        Self::new(Decimal::new(i64::from(tenths), 1))
    }

    /// Create a rating from tenths, capping anything above `5.0`.
    #[must_use]
    pub fn clamped_tenths(tenths: u8) -> Self {
        Self(Decimal::new(i64::from(tenths.min(50)), 1))
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
