//! Type-safe price representation in whole rupees.

use serde::{Deserialize, Serialize};

/// A non-negative price in whole rupees.
///
/// The catalog carries prices as plain integers with no minor unit (₹450,
/// not paise), so the representation is a bare `u64`. Line totals saturate
/// instead of wrapping; a cart large enough to saturate is not a realistic
/// order.
///
/// ## Examples
///
/// ```
/// use patisserie_core::Price;
///
/// let price = Price::new(100);
/// assert_eq!(price.line_total(2).rupees(), 200);
/// assert_eq!(format!("{price}"), "₹100");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create a price from whole rupees.
    #[must_use]
    pub const fn new(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Get the amount in whole rupees.
    #[must_use]
    pub const fn rupees(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub const fn line_total(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Sum with another price, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl From<u64> for Price {
    fn from(rupees: u64) -> Self {
        Self(rupees)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
