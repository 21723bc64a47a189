//! # Geocentric distance with an explicit unit
//!
//! User input for the distance to the Earth comes either in **kilometers** or as a
//! **multiple of the Earth radius**. Instead of sniffing the raw text at every use site,
//! the text is parsed once into a tagged [`Distance`] and converted on demand.
//!
//! ## Accepted text forms
//!
//! ```text
//! 6371        → 6371 km
//! 6371 km     → 6371 km
//! 1.5R        → 1.5 Earth radii
//! 1.5 R⊕      → 1.5 Earth radii
//! 2Re         → 2 Earth radii
//! ```
//!
//! The Earth-radius marker is case-sensitive: `r` is not accepted.
use std::{fmt, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::space0,
    combinator::{all_consuming, opt, value},
    number::complete::double,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    constants::{Kilometer, R_EARTH_KM},
    conversion::require_positive,
};

/// Unit attached to a [`Distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Kilometers,
    EarthRadii,
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Kilometers => write!(f, "km"),
            DistanceUnit::EarthRadii => write!(f, "R⊕"),
        }
    }
}

/// A strictly positive distance tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    /// Distance expressed in kilometers.
    pub fn kilometers(value: f64) -> Self {
        Distance {
            value,
            unit: DistanceUnit::Kilometers,
        }
    }

    /// Distance expressed as a multiple of the Earth radius.
    pub fn earth_radii(value: f64) -> Self {
        Distance {
            value,
            unit: DistanceUnit::EarthRadii,
        }
    }

    /// Convert to kilometers.
    ///
    /// Arguments
    /// -----------------
    /// * `earth_radius_km` – Earth radius used to scale [`DistanceUnit::EarthRadii`] values.
    pub fn to_km(&self, earth_radius_km: f64) -> Kilometer {
        match self.unit {
            DistanceUnit::Kilometers => self.value,
            DistanceUnit::EarthRadii => self.value * earth_radius_km,
        }
    }

    /// Convert to a multiple of the Earth radius.
    pub fn in_earth_radii(&self, earth_radius_km: f64) -> f64 {
        self.to_km(earth_radius_km) / earth_radius_km
    }

    /// Parse a distance from user text and validate it.
    ///
    /// Arguments
    /// -----------------
    /// * `field` – Field name reported in errors (e.g. `"r_earth"`).
    /// * `text` – Number with an optional unit suffix (`km`, `R`, `R⊕`, `Re`).
    ///
    /// Return
    /// ----------
    /// * A [`Distance`]; a bare number is taken as kilometers.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::MissingField`] – blank text.
    /// * [`CometaError::InvalidNumber`] – unparsable number, unknown unit, or trailing garbage.
    /// * [`CometaError::NonPositive`] – value ≤ 0.
    pub fn parse_field(field: &str, text: &str) -> Result<Self, CometaError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CometaError::MissingField(field.to_string()));
        }

        let (_, (value, unit)) =
            parse_distance(trimmed).map_err(|_| CometaError::invalid_number(field, trimmed))?;

        let value = require_positive(field, value)?;
        Ok(Distance {
            value,
            unit: unit.unwrap_or(DistanceUnit::Kilometers),
        })
    }
}

impl FromStr for Distance {
    type Err = CometaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distance::parse_field("distance", s)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DistanceUnit::Kilometers => write!(f, "{} km", self.value),
            DistanceUnit::EarthRadii => write!(f, "{} R⊕", self.value),
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Distance::kilometers(R_EARTH_KM)
    }
}

fn parse_unit(input: &str) -> IResult<&str, DistanceUnit> {
    alt((
        value(
            DistanceUnit::EarthRadii,
            alt((tag("R⊕"), tag("Re"), tag("R"))),
        ),
        value(DistanceUnit::Kilometers, tag("km")),
    ))
    .parse(input)
}

fn parse_distance(input: &str) -> IResult<&str, (f64, Option<DistanceUnit>)> {
    all_consuming(delimited(
        space0,
        (double, preceded(space0, opt(parse_unit))),
        space0,
    ))
    .parse(input)
}
