//! # Estimator parameters
//!
//! [`EstimatorParams`] holds the thresholds that steer the branching of the
//! sublimation estimate. The defaults reproduce the published model exactly; the
//! [`EstimatorParamsBuilder`] exists so that callers (and tests) can explore other
//! thresholds while keeping every value validated.
use std::fmt;

use crate::{
    cometa_errors::CometaError,
    constants::{
        ATMOSPHERE_EARTH_RADII, ATMOSPHERIC_PRESSURE_PA, FAR_FIELD_EARTH_RADII, R_EARTH_KM,
    },
};

/// Thresholds of the sublimation estimate.
///
/// Fields
/// -----------------
/// * `atmospheric_pressure_pa` – Pressure a vapor must exceed to sublimate inside the atmosphere.
/// * `earth_radius_km` – Earth radius used for unit conversion and distance ratios.
/// * `far_field_radii` – Beyond this many Earth radii the Earth's thermal contribution is dropped.
/// * `atmosphere_radii` – Up to (and including) this many Earth radii the body is inside the atmosphere.
///
/// Invariants
/// -----------------
/// * All values are finite and strictly positive (enforced by [`EstimatorParamsBuilder::build`]).
///
/// See also
/// ------------
/// * [`SublimationEstimator`](crate::sublimation::SublimationEstimator) – Consumer of these parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorParams {
    pub atmospheric_pressure_pa: f64,
    pub earth_radius_km: f64,
    pub far_field_radii: f64,
    pub atmosphere_radii: f64,
}

impl EstimatorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`EstimatorParamsBuilder`] initialized with the default thresholds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cometa::sublimation::EstimatorParams;
    ///
    /// let params = EstimatorParams::builder()
    ///     .atmospheric_pressure_pa(5e4)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.earth_radius_km, 6371.0);
    /// ```
    pub fn builder() -> EstimatorParamsBuilder {
        EstimatorParamsBuilder::new()
    }

    /// Distance (km) beyond which only the solar term of the thermal balance is kept.
    pub fn far_field_km(&self) -> f64 {
        self.far_field_radii * self.earth_radius_km
    }

    /// Distance (km) up to which the body is considered inside the atmosphere.
    pub fn atmosphere_limit_km(&self) -> f64 {
        self.atmosphere_radii * self.earth_radius_km
    }
}

impl Default for EstimatorParams {
    fn default() -> Self {
        EstimatorParams {
            atmospheric_pressure_pa: ATMOSPHERIC_PRESSURE_PA,
            earth_radius_km: R_EARTH_KM,
            far_field_radii: FAR_FIELD_EARTH_RADII,
            atmosphere_radii: ATMOSPHERE_EARTH_RADII,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EstimatorParamsBuilder {
    params: EstimatorParams,
}

impl Default for EstimatorParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: EstimatorParams::default(),
        }
    }

    pub fn atmospheric_pressure_pa(mut self, v: f64) -> Self {
        self.params.atmospheric_pressure_pa = v;
        self
    }
    pub fn earth_radius_km(mut self, v: f64) -> Self {
        self.params.earth_radius_km = v;
        self
    }
    pub fn far_field_radii(mut self, v: f64) -> Self {
        self.params.far_field_radii = v;
        self
    }
    pub fn atmosphere_radii(mut self, v: f64) -> Self {
        self.params.atmosphere_radii = v;
        self
    }

    fn gt0(x: f64) -> bool {
        x.is_finite() && x > 0.0
    }

    /// Finalize the builder.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::InvalidParameter`] naming the first value that is not finite and > 0.
    pub fn build(self) -> Result<EstimatorParams, CometaError> {
        let p = &self.params;
        let checks = [
            ("atmospheric_pressure_pa", p.atmospheric_pressure_pa),
            ("earth_radius_km", p.earth_radius_km),
            ("far_field_radii", p.far_field_radii),
            ("atmosphere_radii", p.atmosphere_radii),
        ];
        if let Some((name, _)) = checks.iter().find(|(_, v)| !Self::gt0(*v)) {
            return Err(CometaError::InvalidParameter(format!(
                "{name} must be finite and > 0"
            )));
        }
        Ok(self.params)
    }
}

impl fmt::Display for EstimatorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Sublimation Estimator Parameters")?;
            writeln!(f, "--------------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "atmospheric_pressure_pa = {:.1} Pa",
                self.atmospheric_pressure_pa,
                "Vapor pressure needed inside the atmosphere"
            )?;
            line!(
                "earth_radius_km         = {:.1} km",
                self.earth_radius_km,
                "Earth radius"
            )?;
            line!(
                "far_field_radii         = {:.2}",
                self.far_field_radii,
                "Solar-only thermal balance beyond"
            )?;
            line!(
                "atmosphere_radii        = {:.2}",
                self.atmosphere_radii,
                "Inside the atmosphere up to"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "EstimatorParams(P_atm={} Pa, R⊕={} km, far={} R⊕, atm={} R⊕)",
                self.atmospheric_pressure_pa,
                self.earth_radius_km,
                self.far_field_radii,
                self.atmosphere_radii
            )
        }
    }
}
