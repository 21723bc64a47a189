//! # Calculation requests
//!
//! JSON request/response contract used to drive the calculators from another process:
//!
//! ```json
//! { "calculation_type": "sublimation",
//!   "parameters": { "r_sun": 1.0, "r_earth": "6371", "T": "250" } }
//! ```
//!
//! | `calculation_type` | parameters                                   | `units` |
//! |--------------------|----------------------------------------------|---------|
//! | `sublimation`      | `r_sun`, `r_earth`, optional `T`             | `K`     |
//! | `mass`             | `m_k`, `delta`, `r`                          | `kg`    |
//! | `nucleus`          | `H`, `pv`, optional `angular_size`, `distance` | `km`  |
//!
//! Parameters may be given as JSON numbers or as text; `r_earth` accepts the Earth-radius
//! suffixes of [`Distance`]. A failed request yields `{ "value": null, "error": "..." }`,
//! never a partial result.
use std::{fmt, str::FromStr};

use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    cometa_errors::CometaError,
    conversion::{parse_number, parse_optional_positive},
    nucleus::{estimate_nucleus, NucleusInput},
    photometry::{estimate_mass, MassInput, MassParams},
    sublimation::{SublimationEstimator, SublimationInput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationType {
    Sublimation,
    Mass,
    Nucleus,
}

impl FromStr for CalculationType {
    type Err = CometaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sublimation" => Ok(CalculationType::Sublimation),
            "mass" => Ok(CalculationType::Mass),
            "nucleus" | "size" => Ok(CalculationType::Nucleus),
            _ => Err(CometaError::UnknownCalculation(s.to_string())),
        }
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CalculationType::Sublimation => "sublimation",
            CalculationType::Mass => "mass",
            CalculationType::Nucleus => "nucleus",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub calculation_type: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    /// Human-readable report of the calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    fn success(value: f64, units: &str, report: String) -> Self {
        CalculationResponse {
            value: Some(value),
            units: Some(units.to_string()),
            report: Some(report),
            ..Default::default()
        }
    }

    pub fn failure(err: &CometaError) -> Self {
        CalculationResponse {
            error: Some(err.to_string()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Text of a request parameter; numbers are rendered as text, `null` counts as absent.
fn field_text(params: &Map<String, Value>, field: &str) -> Result<Option<String>, CometaError> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(CometaError::invalid_number(field, &other.to_string())),
    }
}

fn required_number(params: &Map<String, Value>, field: &str) -> Result<f64, CometaError> {
    let text =
        field_text(params, field)?.ok_or_else(|| CometaError::MissingField(field.to_string()))?;
    parse_number(field, &text)
}

fn optional_number(params: &Map<String, Value>, field: &str) -> Result<Option<f64>, CometaError> {
    match field_text(params, field)? {
        Some(text) if !text.trim().is_empty() => parse_number(field, &text).map(Some),
        _ => Ok(None),
    }
}

/// Dispatches [`CalculationRequest`]s to the calculators.
#[derive(Debug, Clone, Default)]
pub struct RequestHandler {
    estimator: SublimationEstimator,
    mass_params: MassParams,
}

impl RequestHandler {
    pub fn new(estimator: SublimationEstimator, mass_params: MassParams) -> Self {
        RequestHandler {
            estimator,
            mass_params,
        }
    }

    /// Run a request, propagating the first error.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::UnknownCalculation`] for an unsupported `calculation_type`.
    /// * Any validation or computation error of the selected calculator.
    pub fn dispatch(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, CometaError> {
        let kind: CalculationType = request.calculation_type.parse()?;
        let params = &request.parameters;

        match kind {
            CalculationType::Sublimation => {
                let r_sun = field_text(params, "r_sun")?;
                let r_earth = field_text(params, "r_earth")?;
                let t = field_text(params, "T")?;
                let input =
                    SublimationInput::from_text(r_sun.as_deref(), r_earth.as_deref(), t.as_deref())?;
                let result = self.estimator.estimate(&input)?;
                Ok(CalculationResponse {
                    composition: Some(result.composition()),
                    ..CalculationResponse::success(
                        result.total_temperature_k,
                        "K",
                        result.to_string(),
                    )
                })
            }
            CalculationType::Mass => {
                let input = MassInput {
                    magnitude: required_number(params, "m_k")?,
                    delta_au: required_number(params, "delta")?,
                    r_au: required_number(params, "r")?,
                };
                let mass = estimate_mass(&input, &self.mass_params)?;
                Ok(CalculationResponse::success(
                    mass.kilograms,
                    "kg",
                    mass.to_string(),
                ))
            }
            CalculationType::Nucleus => {
                let input = NucleusInput {
                    abs_magnitude: required_number(params, "H")?,
                    albedo: required_number(params, "pv")?,
                    angular_size_arcsec: optional_number(params, "angular_size")?,
                    distance_au: parse_optional_positive(
                        "distance",
                        field_text(params, "distance")?.as_deref(),
                    )?,
                };
                let nucleus = estimate_nucleus(&input)?;
                Ok(CalculationResponse::success(
                    nucleus.diameter_km,
                    "km",
                    nucleus.to_string(),
                ))
            }
        }
    }

    /// Run a request and fold any error into the response.
    pub fn handle(&self, request: &CalculationRequest) -> CalculationResponse {
        match self.dispatch(request) {
            Ok(response) => {
                info!(
                    "{} request answered: {:?} {}",
                    request.calculation_type,
                    response.value,
                    response.units.as_deref().unwrap_or("")
                );
                response
            }
            Err(err) => {
                error!(
                    "{} request failed: {err} (parameters: {})",
                    request.calculation_type,
                    Value::Object(request.parameters.clone())
                );
                CalculationResponse::failure(&err)
            }
        }
    }

    /// Decode a JSON request and run it.
    pub fn handle_json(&self, json: &str) -> CalculationResponse {
        match serde_json::from_str::<CalculationRequest>(json) {
            Ok(request) => self.handle(&request),
            Err(err) => {
                let err = CometaError::from(err);
                error!("malformed request: {err}");
                CalculationResponse::failure(&err)
            }
        }
    }
}
