//! # Constants and type definitions for Cometa
//!
//! This module centralizes the **physical constants**, **empirical scaling constants** and
//! **unit type aliases** used throughout the `cometa` library.
//!
//! ## Overview
//!
//! - Geophysical and astronomical constants (Earth radius, astronomical unit, sea-level pressure)
//! - Literal constants of the empirical sublimation scaling law
//! - Literal constants of the photometric mass and nucleus size relations
//! - Unit aliases used in public signatures
//!
//! The scaling-law constants are reproduced exactly as published with the model; they are
//! empirical fits, not first-principles values, and must not be "corrected".

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Mean Earth radius in kilometers
pub const R_EARTH_KM: f64 = 6371.0;

/// Astronomical Unit in kilometers, as used by the nucleus linear-size relation
pub const AU_KM: f64 = 149.6e6;

/// Standard sea-level atmospheric pressure (Pa)
pub const ATMOSPHERIC_PRESSURE_PA: f64 = 101_325.0;

/// Arcseconds → degrees
pub const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

// -------------------------------------------------------------------------------------------------
// Thermal balance
// -------------------------------------------------------------------------------------------------

/// Blackbody equilibrium temperature of a grain at 1 au from the Sun (K)
pub const SOLAR_EQUILIBRIUM_1AU_K: f64 = 278.0;

/// Mean surface temperature of the Earth (K)
pub const EARTH_SURFACE_TEMPERATURE_K: f64 = 288.0;

/// Fraction of sunlight reflected by the Earth (Bond albedo), enters as `1 + α`
pub const EARTH_ALBEDO_FRACTION: f64 = 0.3;

/// Beyond this many Earth radii only the solar term of the thermal balance is kept
pub const FAR_FIELD_EARTH_RADII: f64 = 10.0;

/// Within this many Earth radii the body is considered inside the atmosphere
pub const ATMOSPHERE_EARTH_RADII: f64 = 1.1;

// -------------------------------------------------------------------------------------------------
// Empirical sublimation scaling law
// -------------------------------------------------------------------------------------------------

/// Prefactor of the sublimation temperature law (K)
pub const SUBLIMATION_T0_K: f64 = 1.3e3;

/// Enthalpy scale of the sublimation temperature law
pub const SUBLIMATION_H0: f64 = 3.2e10;

/// Molar mass scale of the sublimation temperature law (g/mol)
pub const SUBLIMATION_MU0: f64 = 170.0;

/// Reference pressure of the `ξ` correction factor (Pa)
pub const SUBLIMATION_P0_REF: f64 = 6.7e14;

/// Slope of the logarithmic `ξ` correction factor
pub const SUBLIMATION_XI_SLOPE: f64 = 0.02;

/// Amplitude of the Earth-proximity term of the sublimation temperature law
pub const SUBLIMATION_EARTH_TERM: f64 = 0.1;

// -------------------------------------------------------------------------------------------------
// Photometry and nucleus size
// -------------------------------------------------------------------------------------------------

/// Reference magnitude of the nucleus used by the photometric mass relation
pub const NUCLEUS_REFERENCE_MAGNITUDE: f64 = -13.78;

/// Default C2 emission efficiency factor `f(C2)`
pub const C2_EFFICIENCY: f64 = 0.031;

/// Scattering normalization of the photometric mass relation
pub const MASS_SCATTERING_NORM: f64 = 1.37e-38;

/// Diameter normalization of the absolute magnitude ↔ size relation (km)
pub const NUCLEUS_DIAMETER_NORM_KM: f64 = 1329.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Absolute temperature in kelvins
pub type Kelvin = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Pressure in pascals
pub type Pascal = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Mass in kilograms
pub type Kilogram = f64;
