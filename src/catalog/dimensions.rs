//! Physical units, orientation and dimension arithmetic

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;

/// Unit system a poster size is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    Cm,
    Inch,
}

impl SizeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Cm => "cm",
            SizeUnit::Inch => "inch",
        }
    }

    /// Factor converting a length in this unit to centimeters
    pub fn to_cm_factor(&self) -> f64 {
        match self {
            SizeUnit::Cm => 1.0,
            SizeUnit::Inch => CM_PER_INCH,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(SizeUnit::Cm),
            "inch" => Ok(SizeUnit::Inch),
            other => Err(format!("unknown size unit '{}' (expected cm or inch)", other)),
        }
    }
}

/// Poster orientation. Landscape is portrait with width and height swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    /// Upper-case first letter, as used in product ids
    pub fn initial(&self) -> char {
        match self {
            Orientation::Portrait => 'P',
            Orientation::Landscape => 'L',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!(
                "unknown orientation '{}' (expected portrait or landscape)",
                other
            )),
        }
    }
}

/// Width and height of a poster in a given unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub unit: SizeUnit,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, unit: SizeUnit) -> Self {
        Self {
            width,
            height,
            unit,
        }
    }

    /// Convert to centimeters. Centimeter input is returned as is.
    pub fn to_cm(&self) -> Dimensions {
        let factor = self.unit.to_cm_factor();
        Dimensions::new(self.width * factor, self.height * factor, SizeUnit::Cm)
    }

    /// L1 distance between two dimension pairs, ignoring units
    pub fn l1_distance(&self, other: &Dimensions) -> f64 {
        (self.width - other.width).abs() + (self.height - other.height).abs()
    }
}

/// Apply an orientation to portrait dimensions.
///
/// Landscape swaps width and height, portrait is the identity. Applying
/// landscape to already landscape dimensions swaps them back.
pub fn resolve_orientation(dims: Dimensions, orientation: Orientation) -> Dimensions {
    match orientation {
        Orientation::Portrait => dims,
        Orientation::Landscape => Dimensions::new(dims.height, dims.width, dims.unit),
    }
}
