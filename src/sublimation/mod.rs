//! # Sublimation estimator
//!
//! Classify which volatile species of a [`SpeciesTable`] would actively sublimate on a
//! small body (grain or nucleus) given its heliocentric distance, its distance to the
//! Earth and, optionally, an imposed temperature.
//!
//! ## Model
//!
//! For every species with valid `(H, μ, P0)`:
//!
//! ```text
//! ξ     = 1 + 0.02 · ln(P0 / 6.7e14)
//! T_sub = 1.3e3 · (1/ξ) · (H / 3.2e10) · (μ / 170) · r☉^(-1/2) · (1 + 0.1 / (1 + (r⊕ / R⊕)²))
//! ```
//!
//! The body temperature `T_total` is either supplied by the caller or derived from the
//! distances:
//!
//! ```text
//! r⊕ > 10 R⊕ :  T_total = 278 / √r☉
//! otherwise  :  T_total = ( (278 / √r☉)⁴ + (288 · √(R⊕ / r⊕) · (1 + 0.3))⁴ )^(1/4)
//! ```
//!
//! A species sublimates when `T_total ≥ T_sub` and, if the body is within 1.1 R⊕ (inclusive),
//! only when its vapor pressure at `T_total` exceeds the atmospheric pressure.
//!
//! ## Guarantees
//!
//! - Pure and deterministic: no I/O apart from logging, the table is never mutated.
//! - The list of sublimating species follows the table's declaration order.
//! - A computation failure on any species aborts the whole estimate; no partial result.
//!
//! ## Typical usage
//!
//! ```rust
//! use cometa::sublimation::{SublimationEstimator, SublimationInput};
//!
//! let input = SublimationInput::from_text(Some("0.1"), Some("1000000"), None).unwrap();
//! let result = SublimationEstimator::default().estimate(&input).unwrap();
//! assert!(result.sublimating.iter().any(|n| n.starts_with("H₂O")));
//! println!("{result}");
//! ```
mod params;

pub use params::{EstimatorParams, EstimatorParamsBuilder};

use std::fmt;

use itertools::Itertools;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    constants::{
        AstronomicalUnit, Kelvin, Kilometer, Pascal, EARTH_ALBEDO_FRACTION,
        EARTH_SURFACE_TEMPERATURE_K, SOLAR_EQUILIBRIUM_1AU_K, SUBLIMATION_EARTH_TERM,
        SUBLIMATION_H0, SUBLIMATION_MU0, SUBLIMATION_P0_REF, SUBLIMATION_T0_K,
        SUBLIMATION_XI_SLOPE,
    },
    conversion::{ensure_finite, parse_optional_positive, parse_positive, require_positive},
    distance::Distance,
    volatiles::{SpeciesTable, ThermalParameters, VolatileSpecies},
};

/// Caller-supplied state of the body for one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SublimationInput {
    /// Heliocentric distance `r☉` (au), strictly positive.
    pub heliocentric_distance_au: AstronomicalUnit,
    /// Geocentric distance `r⊕`, strictly positive.
    pub geocentric_distance: Distance,
    /// Imposed temperature (K); derived from the distances when absent.
    pub ambient_temperature_k: Option<Kelvin>,
}

impl SublimationInput {
    /// Build a validated input from already typed values.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::NonPositive`] / [`CometaError::InvalidNumber`] naming `r_sun`,
    ///   `r_earth` or `T` when a value is not finite and strictly positive.
    pub fn new(
        heliocentric_distance_au: f64,
        geocentric_distance: Distance,
        ambient_temperature_k: Option<f64>,
    ) -> Result<Self, CometaError> {
        require_positive("r_sun", heliocentric_distance_au)?;
        require_positive("r_earth", geocentric_distance.value)?;
        if let Some(t) = ambient_temperature_k {
            require_positive("T", t)?;
        }
        Ok(SublimationInput {
            heliocentric_distance_au,
            geocentric_distance,
            ambient_temperature_k,
        })
    }

    /// Parse the input from raw text fields, as typed by a user.
    ///
    /// Arguments
    /// -----------------
    /// * `r_sun` – Heliocentric distance in au.
    /// * `r_earth` – Geocentric distance, kilometers unless suffixed with an Earth-radius
    ///   marker (see [`Distance::parse_field`]).
    /// * `temperature` – Optional temperature in K; `None` or blank means "derive it".
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::MissingField`] if `r_sun` or `r_earth` is absent or blank.
    /// * [`CometaError::InvalidNumber`] / [`CometaError::NonPositive`] for malformed values.
    ///   A malformed temperature is an error, never silently ignored.
    pub fn from_text(
        r_sun: Option<&str>,
        r_earth: Option<&str>,
        temperature: Option<&str>,
    ) -> Result<Self, CometaError> {
        let r_sun = r_sun.ok_or_else(|| CometaError::MissingField("r_sun".into()))?;
        let r_earth = r_earth.ok_or_else(|| CometaError::MissingField("r_earth".into()))?;

        Ok(SublimationInput {
            heliocentric_distance_au: parse_positive("r_sun", r_sun)?,
            geocentric_distance: Distance::parse_field("r_earth", r_earth)?,
            ambient_temperature_k: parse_optional_positive("T", temperature)?,
        })
    }
}

/// How `T_total` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSource {
    /// Imposed by the caller.
    Supplied,
    /// Solar blackbody term only (far from the Earth).
    SolarOnly,
    /// Fourth-power sum of the solar and Earth-proximity terms.
    SolarAndEarth,
}

/// Outcome of the sublimation test for one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// `T_total < T_sub`.
    BelowThreshold,
    /// Inside the atmosphere and the vapor pressure does not exceed the ambient pressure.
    SuppressedByAtmosphere { vapor_pressure_pa: Pascal },
    /// The species sublimates; the vapor pressure is only evaluated inside the atmosphere.
    Sublimating { vapor_pressure_pa: Option<Pascal> },
}

impl Verdict {
    pub fn is_sublimating(&self) -> bool {
        matches!(self, Verdict::Sublimating { .. })
    }
}

/// Per-species diagnostics of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesVerdict {
    pub name: String,
    pub threshold_temperature_k: Kelvin,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Complete result of [`SublimationEstimator::estimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SublimationResult {
    pub heliocentric_distance_au: AstronomicalUnit,
    pub geocentric_distance_km: Kilometer,
    /// `r⊕ / R⊕`, the exact ratio used in the `T_sub` formula.
    pub geocentric_distance_earth_radii: f64,
    pub total_temperature_k: Kelvin,
    pub temperature_source: TemperatureSource,
    /// Names of the sublimating species, in table order.
    pub sublimating: Vec<String>,
    /// Diagnostics for every evaluated species (skipped species are absent), in table order.
    pub species: Vec<SpeciesVerdict>,
}

impl SublimationResult {
    /// Comma-joined sublimating species, or `"none"`.
    pub fn composition(&self) -> String {
        if self.sublimating.is_empty() {
            "none".to_string()
        } else {
            self.sublimating.iter().join(", ")
        }
    }
}

impl fmt::Display for SublimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Computed parameters:")?;
        writeln!(
            f,
            "- Heliocentric distance (r☉): {:.2} au",
            self.heliocentric_distance_au
        )?;
        writeln!(
            f,
            "- Geocentric distance (r⊕): {:.2} km ({:.2} R⊕)",
            self.geocentric_distance_km, self.geocentric_distance_earth_radii
        )?;
        writeln!(
            f,
            "- Total temperature (T_total): {:.2} K",
            self.total_temperature_k
        )?;
        writeln!(f)?;
        writeln!(f, "Sublimating species:")?;
        write!(f, "{}", self.composition())
    }
}

/// `ξ = 1 + 0.02 · ln(P0 / 6.7e14)`.
pub fn xi_factor(reference_pressure: Pascal) -> f64 {
    1.0 + SUBLIMATION_XI_SLOPE * (reference_pressure / SUBLIMATION_P0_REF).ln()
}

/// Threshold sublimation temperature of one species (empirical scaling law).
///
/// Arguments
/// -----------------
/// * `params` – Validated `(H, μ, P0)` of the species.
/// * `r_sun` – Heliocentric distance (au).
/// * `earth_ratio` – Geocentric distance in Earth radii, `r⊕ / R⊕`.
///
/// Return
/// ----------
/// * `T_sub` in K. It strictly decreases as `r_sun` grows (`∝ r_sun^-1/2`).
pub fn threshold_temperature(params: &ThermalParameters, r_sun: f64, earth_ratio: f64) -> Kelvin {
    let xi = xi_factor(params.reference_pressure);
    SUBLIMATION_T0_K
        * (1.0 / xi)
        * (params.enthalpy / SUBLIMATION_H0)
        * (params.molar_mass / SUBLIMATION_MU0)
        * r_sun.powf(-0.5)
        * (1.0 + SUBLIMATION_EARTH_TERM / (1.0 + earth_ratio.powi(2)))
}

/// Body temperature from the distances alone.
///
/// Arguments
/// -----------------
/// * `r_sun` – Heliocentric distance (au).
/// * `r_earth_km` – Geocentric distance (km).
/// * `params` – Supplies the Earth radius and the far-field limit.
///
/// Return
/// ----------
/// * `(T_total, source)` where `source` is [`TemperatureSource::SolarOnly`] beyond the
///   far-field limit and [`TemperatureSource::SolarAndEarth`] otherwise.
pub fn equilibrium_temperature(
    r_sun: f64,
    r_earth_km: f64,
    params: &EstimatorParams,
) -> (Kelvin, TemperatureSource) {
    let t_sun = SOLAR_EQUILIBRIUM_1AU_K / r_sun.sqrt();
    if r_earth_km > params.far_field_km() {
        return (t_sun, TemperatureSource::SolarOnly);
    }
    let t_earth = EARTH_SURFACE_TEMPERATURE_K
        * (params.earth_radius_km / r_earth_km).sqrt()
        * (1.0 + EARTH_ALBEDO_FRACTION);
    (
        (t_sun.powi(4) + t_earth.powi(4)).powf(0.25),
        TemperatureSource::SolarAndEarth,
    )
}

/// Stateless estimator over an injected, read-only species table.
///
/// Concurrent calls are safe: [`estimate`](SublimationEstimator::estimate) takes `&self`
/// and allocates its own local state.
#[derive(Debug, Clone, Default)]
pub struct SublimationEstimator {
    table: SpeciesTable,
    params: EstimatorParams,
}

impl SublimationEstimator {
    pub fn new(table: SpeciesTable, params: EstimatorParams) -> Self {
        SublimationEstimator { table, params }
    }

    pub fn with_table(table: SpeciesTable) -> Self {
        Self::new(table, EstimatorParams::default())
    }

    pub fn table(&self) -> &SpeciesTable {
        &self.table
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Run the sublimation estimate.
    ///
    /// Arguments
    /// -----------------
    /// * `input` – Validated body state.
    ///
    /// Return
    /// ----------
    /// * A [`SublimationResult`] with `T_total`, the ordered sublimating species, the distance
    ///   summary and per-species diagnostics.
    ///
    /// Errors
    /// ----------
    /// * Validation errors if `input` was built by hand with non-positive values.
    /// * [`CometaError::Computation`] if `T_total`, a `T_sub`, or a vapor pressure is not finite.
    ///   The estimate is aborted as a whole.
    pub fn estimate(&self, input: &SublimationInput) -> Result<SublimationResult, CometaError> {
        let p = &self.params;
        let r_sun = require_positive("r_sun", input.heliocentric_distance_au)?;
        let r_earth_km = require_positive(
            "r_earth",
            input.geocentric_distance.to_km(p.earth_radius_km),
        )?;
        let earth_ratio = r_earth_km / p.earth_radius_km;

        let (total_temperature_k, temperature_source) = match input.ambient_temperature_k {
            Some(t) => (require_positive("T", t)?, TemperatureSource::Supplied),
            None => equilibrium_temperature(r_sun, r_earth_km, p),
        };
        let total_temperature_k = ensure_finite("T_total", total_temperature_k)?;

        let inside_atmosphere = r_earth_km <= p.atmosphere_limit_km();

        let species = self
            .table
            .iter()
            .filter_map(|species| match species.thermal_parameters() {
                Some(thermal) => Some((species, thermal)),
                None => {
                    warn!(
                        "Skipping species {:?}: H, mu and P0 must all be present and > 0",
                        species.name
                    );
                    None
                }
            })
            .map(|(species, thermal)| {
                self.classify(
                    species,
                    &thermal,
                    r_sun,
                    earth_ratio,
                    total_temperature_k,
                    inside_atmosphere,
                )
            })
            .collect::<Result<Vec<_>, CometaError>>()
            .inspect_err(|e| {
                error!("Sublimation estimate aborted for {input:?} with {p}: {e}");
            })?;

        let sublimating: Vec<String> = species
            .iter()
            .filter(|s| s.verdict.is_sublimating())
            .map(|s| s.name.clone())
            .collect();

        info!(
            "Sublimation estimate: r_sun={r_sun} au, r_earth={r_earth_km} km, T_total={total_temperature_k:.2} K ({temperature_source:?}), {} of {} species sublimating",
            sublimating.len(),
            species.len()
        );

        Ok(SublimationResult {
            heliocentric_distance_au: r_sun,
            geocentric_distance_km: r_earth_km,
            geocentric_distance_earth_radii: earth_ratio,
            total_temperature_k,
            temperature_source,
            sublimating,
            species,
        })
    }

    fn classify(
        &self,
        species: &VolatileSpecies,
        thermal: &ThermalParameters,
        r_sun: f64,
        earth_ratio: f64,
        total_temperature_k: Kelvin,
        inside_atmosphere: bool,
    ) -> Result<SpeciesVerdict, CometaError> {
        let t_sub = ensure_finite(
            &format!("T_sub of {}", species.name),
            threshold_temperature(thermal, r_sun, earth_ratio),
        )?;

        let verdict = if total_temperature_k < t_sub {
            Verdict::BelowThreshold
        } else if inside_atmosphere {
            let vapor_pressure_pa = species.vapor_pressure.pressure_at(total_temperature_k)?;
            if vapor_pressure_pa > self.params.atmospheric_pressure_pa {
                Verdict::Sublimating {
                    vapor_pressure_pa: Some(vapor_pressure_pa),
                }
            } else {
                Verdict::SuppressedByAtmosphere { vapor_pressure_pa }
            }
        } else {
            Verdict::Sublimating {
                vapor_pressure_pa: None,
            }
        };

        debug!(
            "{}: T_sub={t_sub:.3} K, T_total={total_temperature_k:.3} K -> {verdict:?}",
            species.name
        );

        Ok(SpeciesVerdict {
            name: species.name.clone(),
            threshold_temperature_k: t_sub,
            verdict,
        })
    }
}

#[cfg(test)]
mod sublimation_test {
    use super::*;
    use crate::volatiles::VaporPressureLaw;
    use approx::assert_relative_eq;

    fn species(name: &str, h: f64, mu: f64, p0: f64, law: VaporPressureLaw) -> VolatileSpecies {
        VolatileSpecies {
            name: name.into(),
            enthalpy: Some(h),
            molar_mass: Some(mu),
            reference_pressure: Some(p0),
            vapor_pressure: law,
            comment: String::new(),
        }
    }

    fn water_params() -> ThermalParameters {
        ThermalParameters {
            enthalpy: 2.83e10,
            molar_mass: 18.0,
            reference_pressure: 1e15,
        }
    }

    #[test]
    fn test_xi_factor() {
        assert_relative_eq!(xi_factor(6.7e14), 1.0);
        assert_relative_eq!(xi_factor(1e15), 1.008_009_551_3, max_relative = 1e-10);
    }

    #[test]
    fn test_threshold_temperature_water() {
        let t = threshold_temperature(&water_params(), 1.0, 1.0);
        assert_relative_eq!(t, 126.802_566_861, max_relative = 1e-9);

        let far = threshold_temperature(&water_params(), 1.0, 1e6 / 6371.0);
        assert_relative_eq!(far, 120.764_839_550, max_relative = 1e-9);
    }

    #[test]
    fn test_equilibrium_temperature_branches() {
        let p = EstimatorParams::default();

        let (t, src) = equilibrium_temperature(1.0, 6371.0, &p);
        assert_eq!(src, TemperatureSource::SolarAndEarth);
        assert_relative_eq!(t, 400.085_707_6, max_relative = 1e-9);

        let (t, src) = equilibrium_temperature(0.1, 1e6, &p);
        assert_eq!(src, TemperatureSource::SolarOnly);
        assert_relative_eq!(t, 278.0 / 0.1_f64.sqrt());

        // exactly at the far-field limit the Earth term is still included
        let (_, src) = equilibrium_temperature(1.0, 10.0 * 6371.0, &p);
        assert_eq!(src, TemperatureSource::SolarAndEarth);
    }

    #[test]
    fn test_supplied_temperature_is_used_as_is() {
        let input = SublimationInput::new(1.0, Distance::kilometers(6371.0), Some(100.0)).unwrap();
        let result = SublimationEstimator::default().estimate(&input).unwrap();
        assert_eq!(result.total_temperature_k, 100.0);
        assert_eq!(result.temperature_source, TemperatureSource::Supplied);
        assert!(result.sublimating.is_empty());
        assert_eq!(result.composition(), "none");
    }

    #[test]
    fn test_atmosphere_suppresses_low_vapor_pressure() {
        let table = SpeciesTable::new(vec![species(
            "weak",
            2.83e10,
            18.0,
            1e15,
            VaporPressureLaw::new(611.0, 5425.0, 273.0),
        )]);
        let estimator = SublimationEstimator::with_table(table);

        let inside = SublimationInput::new(1.0, Distance::earth_radii(1.0), Some(200.0)).unwrap();
        let result = estimator.estimate(&inside).unwrap();
        assert!(result.sublimating.is_empty());
        assert!(matches!(
            result.species[0].verdict,
            Verdict::SuppressedByAtmosphere { .. }
        ));

        let outside = SublimationInput::new(1.0, Distance::earth_radii(2.0), Some(200.0)).unwrap();
        let result = estimator.estimate(&outside).unwrap();
        assert_eq!(result.sublimating, vec!["weak".to_string()]);
        assert_eq!(
            result.species[0].verdict,
            Verdict::Sublimating {
                vapor_pressure_pa: None
            }
        );
    }

    #[test]
    fn test_invalid_species_are_skipped() {
        let mut broken = species(
            "broken",
            1.0,
            1.0,
            1.0,
            VaporPressureLaw::new(1.0, 1.0, 1.0),
        );
        broken.reference_pressure = None;
        let mut table: Vec<VolatileSpecies> = SpeciesTable::builtin().iter().cloned().collect();
        table.insert(1, broken);
        let estimator = SublimationEstimator::with_table(SpeciesTable::new(table));

        let input = SublimationInput::new(0.1, Distance::kilometers(1e6), None).unwrap();
        let result = estimator.estimate(&input).unwrap();
        assert_eq!(result.species.len(), 13);
        assert!(result.species.iter().all(|s| s.name != "broken"));
    }

    #[test]
    fn test_computation_error_aborts_the_estimate() {
        let table = SpeciesTable::new(vec![
            species("ok", 1e10, 20.0, 1e5, VaporPressureLaw::new(1e5, 100.0, 50.0)),
            species("bad", 1e10, 20.0, 1e5, VaporPressureLaw::new(1e5, 100.0, -1.0)),
        ]);
        let estimator = SublimationEstimator::with_table(table);
        let input = SublimationInput::new(1.0, Distance::earth_radii(1.0), Some(500.0)).unwrap();
        assert!(matches!(
            estimator.estimate(&input),
            Err(CometaError::Computation(_))
        ));
    }

    #[test]
    fn test_input_from_text() {
        let input = SublimationInput::from_text(Some("1"), Some("2R"), Some("")).unwrap();
        assert_eq!(input.heliocentric_distance_au, 1.0);
        assert_eq!(input.geocentric_distance, Distance::earth_radii(2.0));
        assert_eq!(input.ambient_temperature_k, None);

        assert_eq!(
            SublimationInput::from_text(Some("1"), Some("6371"), Some("warm")),
            Err(CometaError::invalid_number("T", "warm"))
        );
        assert_eq!(
            SublimationInput::from_text(Some("1"), None, None),
            Err(CometaError::MissingField("r_earth".into()))
        );
        assert_eq!(
            SublimationInput::from_text(Some("-1"), Some("6371"), None),
            Err(CometaError::non_positive("r_sun", -1.0))
        );
    }

    #[test]
    fn test_report_layout() {
        let input = SublimationInput::new(1.0, Distance::kilometers(6371.0), Some(100.0)).unwrap();
        let report = SublimationEstimator::default()
            .estimate(&input)
            .unwrap()
            .to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Computed parameters:");
        assert_eq!(lines[1], "- Heliocentric distance (r☉): 1.00 au");
        assert_eq!(lines[2], "- Geocentric distance (r⊕): 6371.00 km (1.00 R⊕)");
        assert_eq!(lines[3], "- Total temperature (T_total): 100.00 K");
        assert_eq!(lines[5], "Sublimating species:");
        assert_eq!(lines[6], "none");
    }
}
