//! # Photometric mass estimate
//!
//! Total mass released by a comet, estimated from its integrated magnitude:
//!
//! ```text
//! N = 10^(-0.4 (m_k − m_nk)) · Δ² · r² / (1.37e-38 · f(C2))
//! ```
//!
//! with `m_k` the comet magnitude, `m_nk` the nucleus reference magnitude, `Δ` and `r`
//! the geocentric and heliocentric distances (au) and `f(C2)` the C2 emission efficiency.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    constants::{
        AstronomicalUnit, Kilogram, C2_EFFICIENCY, MASS_SCATTERING_NORM,
        NUCLEUS_REFERENCE_MAGNITUDE,
    },
    conversion::{ensure_finite, require_finite, require_positive},
};

/// Model constants of the photometric mass relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassParams {
    pub nucleus_reference_magnitude: f64,
    pub c2_efficiency: f64,
}

impl Default for MassParams {
    fn default() -> Self {
        MassParams {
            nucleus_reference_magnitude: NUCLEUS_REFERENCE_MAGNITUDE,
            c2_efficiency: C2_EFFICIENCY,
        }
    }
}

/// Observational inputs of the mass estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassInput {
    /// Comet magnitude `m_k`.
    pub magnitude: f64,
    /// Geocentric distance `Δ` (au).
    pub delta_au: AstronomicalUnit,
    /// Heliocentric distance `r` (au).
    pub r_au: AstronomicalUnit,
}

/// Mass released by the comet, in three units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassEstimate {
    pub kilograms: Kilogram,
    pub tonnes: f64,
    pub megatonnes: f64,
}

/// Estimate the mass released by the comet.
///
/// Arguments
/// -----------------
/// * `input` – Magnitude and distances; `delta_au` and `r_au` must be > 0.
/// * `params` – Model constants (`f(C2)` must be > 0).
///
/// Errors
/// ----------
/// * Validation errors naming `m_k`, `delta`, `r` or `f_c2`.
/// * [`CometaError::Computation`] if the result overflows.
pub fn estimate_mass(input: &MassInput, params: &MassParams) -> Result<MassEstimate, CometaError> {
    let m_k = require_finite("m_k", input.magnitude)?;
    let delta = require_positive("delta", input.delta_au)?;
    let r = require_positive("r", input.r_au)?;
    let f_c2 = require_positive("f_c2", params.c2_efficiency)?;
    let m_nk = require_finite("m_nk", params.nucleus_reference_magnitude)?;

    let numerator = 10f64.powf(-0.4 * (m_k - m_nk)) * delta.powi(2) * r.powi(2);
    let denominator = MASS_SCATTERING_NORM * f_c2;
    let kilograms = ensure_finite("released mass", numerator / denominator)?;

    Ok(MassEstimate {
        kilograms,
        tonnes: kilograms / 1e3,
        megatonnes: kilograms / 1e9,
    })
}

impl fmt::Display for MassEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total mass released by the comet (N):")?;
        writeln!(f, "{:.2e} kg", self.kilograms)?;
        writeln!(f, "{:.2e} tonnes", self.tonnes)?;
        write!(f, "{:.2e} megatonnes", self.megatonnes)
    }
}
