//! # Cometa
//!
//! Closed-form estimators for cometary physics:
//!
//! * [`sublimation`] – equilibrium temperature of a small body and the volatile species that
//!   actively sublimate at that temperature,
//! * [`photometry`] – mass released by the comet from its integrated magnitude,
//! * [`nucleus`] – nucleus diameter from absolute magnitude and albedo,
//! * [`curves`] – model `Afρ` and light curves against distance or time.
//!
//! Inputs can be typed directly, read from `KEY = value` parameter files ([`param_file`]) or
//! sent as JSON calculation requests ([`request`]).
//!
//! ```rust
//! use cometa::{Distance, SublimationEstimator, SublimationInput};
//!
//! let input = SublimationInput::new(0.1, Distance::kilometers(1e6), None).unwrap();
//! let result = SublimationEstimator::default().estimate(&input).unwrap();
//! assert!(result.sublimating.iter().any(|name| name.starts_with("H₂O")));
//! ```
pub mod cometa_errors;
pub mod constants;
mod conversion;
pub mod curves;
pub mod display;
pub mod distance;
pub mod nucleus;
pub mod param_file;
pub mod photometry;
pub mod points;
pub mod request;
pub mod sublimation;
pub mod volatiles;

pub use cometa_errors::CometaError;
pub use distance::{Distance, DistanceUnit};
pub use sublimation::{EstimatorParams, SublimationEstimator, SublimationInput, SublimationResult};
pub use volatiles::{SpeciesTable, VaporPressureLaw, VolatileSpecies};
