//! # Nucleus size estimate
//!
//! Diameter of a cometary nucleus from its absolute magnitude `H` and geometric albedo `p_v`:
//!
//! ```text
//! D = 1329 / √p_v · 10^(-0.2 H)      [km]
//! ```
//!
//! When an angular size is also measured, the corresponding linear size at the given
//! distance is reported as well.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    constants::{ArcSec, AstronomicalUnit, Kilometer, ARCSEC_TO_DEG, AU_KM, NUCLEUS_DIAMETER_NORM_KM},
    conversion::{ensure_finite, require_finite, require_positive},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NucleusInput {
    /// Absolute magnitude `H`.
    pub abs_magnitude: f64,
    /// Geometric albedo `p_v`, in `(0, 1]`.
    pub albedo: f64,
    /// Measured angular size (arcsec); `None` or `0` skips the linear size.
    pub angular_size_arcsec: Option<ArcSec>,
    /// Distance used for the linear size (au), 1 au when absent.
    pub distance_au: Option<AstronomicalUnit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSize {
    pub angular_size_arcsec: ArcSec,
    pub distance_au: AstronomicalUnit,
    pub size_km: Kilometer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NucleusEstimate {
    pub diameter_km: Kilometer,
    pub albedo: f64,
    pub abs_magnitude: f64,
    pub linear_size: Option<LinearSize>,
}

/// Nucleus diameter (km) from absolute magnitude and albedo.
pub fn nucleus_diameter(abs_magnitude: f64, albedo: f64) -> Kilometer {
    NUCLEUS_DIAMETER_NORM_KM / albedo.sqrt() * 10f64.powf(-0.2 * abs_magnitude)
}

/// Linear size (km) subtended by `angular_size_arcsec` at `distance_au`.
pub fn linear_size(angular_size_arcsec: ArcSec, distance_au: AstronomicalUnit) -> Kilometer {
    distance_au * AU_KM * (angular_size_arcsec * ARCSEC_TO_DEG).to_radians().tan()
}

/// Estimate the nucleus size.
///
/// Errors
/// ----------
/// * [`CometaError::OutOfRange`] for an albedo outside `(0, 1]` or a negative angular size.
/// * [`CometaError::NonPositive`] for a non-positive distance.
/// * [`CometaError::Computation`] if a result is not finite.
pub fn estimate_nucleus(input: &NucleusInput) -> Result<NucleusEstimate, CometaError> {
    let h = require_finite("H", input.abs_magnitude)?;
    let pv = require_finite("pv", input.albedo)?;
    if !(pv > 0.0 && pv <= 1.0) {
        return Err(CometaError::OutOfRange {
            field: "pv".into(),
            reason: format!("albedo must lie in (0, 1], got {pv}"),
        });
    }

    let angular = require_finite("angular_size", input.angular_size_arcsec.unwrap_or(0.0))?;
    if angular < 0.0 {
        return Err(CometaError::OutOfRange {
            field: "angular_size".into(),
            reason: format!("angular size cannot be negative, got {angular}"),
        });
    }

    let diameter_km = ensure_finite("nucleus diameter", nucleus_diameter(h, pv))?;

    let linear_size = if angular > 0.0 {
        let distance_au = require_positive("distance", input.distance_au.unwrap_or(1.0))?;
        Some(LinearSize {
            angular_size_arcsec: angular,
            distance_au,
            size_km: ensure_finite("linear size", linear_size(angular, distance_au))?,
        })
    } else {
        None
    };

    Ok(NucleusEstimate {
        diameter_km,
        albedo: pv,
        abs_magnitude: h,
        linear_size,
    })
}

impl fmt::Display for NucleusEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nucleus diameter: {:.2} km", self.diameter_km)?;
        writeln!(f, "Geometric albedo (p_v): {:.3}", self.albedo)?;
        write!(f, "Absolute magnitude (H): {:.2}", self.abs_magnitude)?;
        if let Some(ls) = &self.linear_size {
            write!(
                f,
                "\nLinear size for {}\": {:.2} km (at {:.2} au)",
                ls.angular_size_arcsec, ls.size_km, ls.distance_au
            )?;
        }
        Ok(())
    }
}
