//! Product category enum.

use serde::{Deserialize, Serialize};

/// Error parsing a [`Category`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// Product category.
///
/// The catalog uses a small fixed set of categories; the admin form offers
/// exactly these choices, so anything else in a document is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Cakes,
    Cupcakes,
    Pastries,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Self; 3] = [Self::Cakes, Self::Cupcakes, Self::Pastries];

    /// The display name, identical to the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cakes => "Cakes",
            Self::Cupcakes => "Cupcakes",
            Self::Pastries => "Pastries",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cakes" => Ok(Self::Cakes),
            "Cupcakes" => Ok(Self::Cupcakes),
            "Pastries" => Ok(Self::Pastries),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}
