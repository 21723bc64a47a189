//! # Volatile species table
//!
//! Pure-data description of the cometary ices considered by the sublimation estimator.
//!
//! Each [`VolatileSpecies`] carries the three parameters of the empirical sublimation
//! temperature law (`H`, `μ`, `P0`) and a [`VaporPressureLaw`], an Arrhenius-like
//! expression evaluated by one shared routine:
//!
//! ```text
//! P(T) = P_ref · exp( β · (1/T_ref − 1/T) )
//! ```
//!
//! A [`SpeciesTable`] is an ordered, immutable list of species. The order is the declaration
//! order and is preserved by every consumer. The compiled-in table is returned by
//! [`SpeciesTable::builtin`]; custom tables can be loaded from JSON with
//! [`SpeciesTable::from_json`] or [`SpeciesTable::from_path`].
//!
//! ## JSON layout
//!
//! ```json
//! [
//!   {
//!     "name": "H₂O (водяной лёд)",
//!     "enthalpy": 2.83e10,
//!     "molar_mass": 18.0,
//!     "reference_pressure": 1e15,
//!     "vapor_pressure": { "p_ref": 611.0, "beta": 5425.0, "t_ref": 273.0 },
//!     "comment": "Main constituent of cometary nuclei"
//!   }
//! ]
//! ```
//!
//! `enthalpy`, `molar_mass` and `reference_pressure` may be omitted; a species whose
//! parameters are missing or non-positive is skipped by the estimator rather than failing
//! the whole calculation.
use std::{fs, slice};

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    constants::{Kelvin, Pascal},
};

/// Arrhenius-like vapor pressure law `P(T) = p_ref · exp(β (1/t_ref − 1/T))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaporPressureLaw {
    /// Pressure at the reference temperature (Pa).
    pub p_ref: Pascal,
    /// Temperature scale `β` (K).
    pub beta: f64,
    /// Reference temperature (K).
    pub t_ref: Kelvin,
}

impl VaporPressureLaw {
    pub const fn new(p_ref: Pascal, beta: f64, t_ref: Kelvin) -> Self {
        VaporPressureLaw { p_ref, beta, t_ref }
    }

    /// Evaluate the vapor pressure at `temperature`.
    ///
    /// Arguments
    /// -----------------
    /// * `temperature` – Absolute temperature (K).
    ///
    /// Return
    /// ----------
    /// * Vapor pressure in Pa.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::Computation`] if `temperature` or `t_ref` is not strictly positive,
    ///   or if the exponential overflows.
    pub fn pressure_at(&self, temperature: Kelvin) -> Result<Pascal, CometaError> {
        if !(temperature > 0.0) || !(self.t_ref > 0.0) {
            return Err(CometaError::Computation(format!(
                "vapor pressure law evaluated at T = {temperature} K with T_ref = {} K",
                self.t_ref
            )));
        }
        let p = self.p_ref * (self.beta * (1.0 / self.t_ref - 1.0 / temperature)).exp();
        if p.is_finite() {
            Ok(p)
        } else {
            Err(CometaError::Computation(format!(
                "vapor pressure overflow at T = {temperature} K"
            )))
        }
    }
}

/// One entry of the volatile species table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatileSpecies {
    /// Display label, e.g. `"CO₂ (сухой лёд)"`.
    pub name: String,
    /// Empirical energy-scale constant `H`.
    #[serde(default)]
    pub enthalpy: Option<f64>,
    /// Molar mass `μ` (g/mol).
    #[serde(default)]
    pub molar_mass: Option<f64>,
    /// Reference pressure `P0` of the sublimation temperature law (Pa).
    #[serde(default)]
    pub reference_pressure: Option<Pascal>,
    pub vapor_pressure: VaporPressureLaw,
    /// Free-text note, not used in computation.
    #[serde(default)]
    pub comment: String,
}

/// Validated `(H, μ, P0)` triple of a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalParameters {
    pub enthalpy: f64,
    pub molar_mass: f64,
    pub reference_pressure: Pascal,
}

impl VolatileSpecies {
    fn builtin(
        name: &str,
        enthalpy: f64,
        molar_mass: f64,
        reference_pressure: Pascal,
        vapor_pressure: VaporPressureLaw,
        comment: &str,
    ) -> Self {
        VolatileSpecies {
            name: name.to_string(),
            enthalpy: Some(enthalpy),
            molar_mass: Some(molar_mass),
            reference_pressure: Some(reference_pressure),
            vapor_pressure,
            comment: comment.to_string(),
        }
    }

    /// Return the `(H, μ, P0)` triple if all three are present, finite and strictly positive.
    pub fn thermal_parameters(&self) -> Option<ThermalParameters> {
        let valid = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        Some(ThermalParameters {
            enthalpy: valid(self.enthalpy)?,
            molar_mass: valid(self.molar_mass)?,
            reference_pressure: valid(self.reference_pressure)?,
        })
    }
}

/// Ordered, immutable list of [`VolatileSpecies`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesTable {
    species: Vec<VolatileSpecies>,
}

impl SpeciesTable {
    pub fn new(species: Vec<VolatileSpecies>) -> Self {
        SpeciesTable { species }
    }

    /// The compiled-in table of 13 cometary volatiles, in declaration order:
    /// main ices, other organics, nitrogen compounds, sulfur compounds, rare components.
    pub fn builtin() -> Self {
        let s = VolatileSpecies::builtin;
        let law = VaporPressureLaw::new;
        SpeciesTable::new(vec![
            // Main volatile ices
            s(
                "H₂O (водяной лёд)",
                2.83e10,
                18.0,
                1e15,
                law(611.0, 5425.0, 273.0),
                "Main constituent of cometary nuclei, sublimates around 150-200 K",
            ),
            s(
                "CO₂ (сухой лёд)",
                2.3e10,
                44.0,
                5.1e6,
                law(5.1e6, 3188.0, 194.0),
                "Second most abundant cometary ice",
            ),
            s(
                "CO (угарный газ)",
                1.3e10,
                28.0,
                1.15e5,
                law(1.15e5, 764.0, 68.0),
                "Sublimates at very low temperatures",
            ),
            s(
                "CH₄ (метан)",
                1.9e10,
                16.0,
                1.3e5,
                law(1.3e5, 1680.0, 91.0),
                "Detected in 67P and Hartley 2",
            ),
            // Other organics
            s(
                "C₂H₆ (этан)",
                2.1e10,
                30.0,
                2.45e5,
                law(2.45e5, 1980.0, 90.0),
                "Detected in Hale-Bopp",
            ),
            s(
                "CH₃OH (метанол)",
                3.6e10,
                32.0,
                1.23e5,
                law(1.23e5, 4630.0, 175.0),
                "Major organic component",
            ),
            s(
                "H₂CO (формальдегид)",
                2.8e10,
                30.0,
                4.57e5,
                law(4.57e5, 3200.0, 134.0),
                "Detected in cometary comae",
            ),
            // Nitrogen compounds
            s(
                "NH₃ (аммиак)",
                2.5e10,
                17.0,
                1e5,
                law(1e5, 2000.0, 100.0),
                "Source of atomic nitrogen",
            ),
            s(
                "HCN (цианистый водород)",
                3.1e10,
                27.0,
                3.47e5,
                law(3.47e5, 3400.0, 150.0),
                "Relevant to prebiotic chemistry",
            ),
            // Sulfur compounds
            s(
                "H₂S (сероводород)",
                2.7e10,
                34.0,
                1.23e6,
                law(1.23e6, 2800.0, 120.0),
                "Main sulfur carrier in comets",
            ),
            s(
                "SO₂ (диоксид серы)",
                3.4e10,
                64.0,
                3.82e5,
                law(3.82e5, 4300.0, 180.0),
                "Detected in Hale-Bopp",
            ),
            // Rare components
            s(
                "N₂ (азот)",
                1.2e10,
                28.0,
                3.5e4,
                law(3.5e4, 500.0, 63.0),
                "Hard to detect, matters for cometary evolution",
            ),
            s(
                "O₂ (кислород)",
                1.6e10,
                32.0,
                2.5e4,
                law(2.5e4, 600.0, 54.0),
                "Unexpectedly detected in 67P",
            ),
        ])
    }

    /// Parse a table from a JSON array of species.
    pub fn from_json(json: &str) -> Result<Self, CometaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON species table from disk.
    pub fn from_path(path: &Utf8Path) -> Result<Self, CometaError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CometaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn iter(&self) -> slice::Iter<'_, VolatileSpecies> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&VolatileSpecies> {
        self.species.iter().find(|s| s.name == name)
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a SpeciesTable {
    type Item = &'a VolatileSpecies;
    type IntoIter = slice::Iter<'a, VolatileSpecies>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
