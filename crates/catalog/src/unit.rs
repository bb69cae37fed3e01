//! Measurement units for ingredients and semifinished items.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use menucost_core::{DomainError, ValueObject};

/// Declared measurement unit of a purchasable or prepared item.
///
/// Composition weights are always stored in grams (or millilitres). The unit
/// only decides how a gram figure maps onto the unit the price is quoted in.
///
/// Parsing and deserialization share one case-insensitive label table that
/// also accepts the Cyrillic labels used by existing catalogs (`кг`,
/// `г`/`гр`, `л`, `мл`, `шт`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "piece")]
    Piece,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Kilogram,
        Unit::Gram,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Piece,
    ];

    /// Short code used on the wire and in reports.
    pub fn code(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
            Unit::Piece => "piece",
        }
    }

    /// Convert a stored gram quantity into a count of this unit.
    ///
    /// Pieces are counted one-to-one: a piece-priced ingredient stores its
    /// count in the gram field.
    pub fn from_grams(self, grams: f64) -> f64 {
        match self {
            Unit::Kilogram | Unit::Liter => grams / 1000.0,
            Unit::Gram | Unit::Milliliter | Unit::Piece => grams,
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Gram
    }
}

impl ValueObject for Unit {}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "кг" => Ok(Unit::Kilogram),
            "g" | "г" | "гр" => Ok(Unit::Gram),
            "l" | "л" => Ok(Unit::Liter),
            "ml" | "мл" => Ok(Unit::Milliliter),
            "piece" | "pcs" | "шт" => Ok(Unit::Piece),
            other => Err(DomainError::validation(format!(
                "unit must be one of: kg, g, l, ml, piece (got '{other}')"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
