//! Product categories.

use serde::{Deserialize, Serialize};

/// A product category.
///
/// The catalog carries three first-class categories; anything else is kept
/// verbatim in `Other` so unknown fixture data round-trips untouched.
/// Serialization uses the Vietnamese display names from the catalog data
/// (`"Phụ kiện"` for accessories).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Camera,
    Laptop,
    Accessory,
    Other(String),
}

impl Category {
    /// The display name used in catalog data and the storefront UI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Camera => "Camera",
            Self::Laptop => "Laptop",
            Self::Accessory => "Phụ kiện",
            Self::Other(name) => name,
        }
    }

    /// Parse a category from its display name.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Camera" => Self::Camera,
            "Laptop" => Self::Laptop,
            "Phụ kiện" => Self::Accessory,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
