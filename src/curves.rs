//! # Activity and light curves
//!
//! Model curves of a comet's dust production proxy `Afρ` and its total magnitude, either
//! against heliocentric distance or against time around perihelion.
//!
//! | Kind                                | x          | y                                          |
//! |-------------------------------------|------------|--------------------------------------------|
//! | [`CurveKind::AfrhoVsDistance`]      | `r` (au)   | `Afρ0 · (r / r0)^(-k)`                     |
//! | [`CurveKind::MagnitudeVsDistance`]  | `r` (au)   | `H + 5 log10(Δ) + 2.5 n log10(r)`          |
//! | [`CurveKind::AfrhoVsTime`]          | `t` (days) | `Afρ0 · exp(-t² / 2τ²)`                    |
//! | [`CurveKind::MagnitudeVsTime`]      | `t` (days) | magnitude at `r(t) = max(r0 + v t, r_min)` |
//!
//! Magnitude curves are flagged with `invert_y` since brighter means a smaller magnitude.
use std::{fmt, fs::File, io::Write, str::FromStr};

use camino::Utf8Path;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cometa_errors::CometaError,
    conversion::{ensure_finite, require_finite, require_positive},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    AfrhoVsDistance,
    MagnitudeVsDistance,
    AfrhoVsTime,
    MagnitudeVsTime,
}

impl CurveKind {
    pub const ALL: [CurveKind; 4] = [
        CurveKind::AfrhoVsDistance,
        CurveKind::MagnitudeVsDistance,
        CurveKind::AfrhoVsTime,
        CurveKind::MagnitudeVsTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurveKind::AfrhoVsDistance => "afrho-distance",
            CurveKind::MagnitudeVsDistance => "magnitude-distance",
            CurveKind::AfrhoVsTime => "afrho-time",
            CurveKind::MagnitudeVsTime => "magnitude-time",
        }
    }

    fn is_magnitude(&self) -> bool {
        matches!(
            self,
            CurveKind::MagnitudeVsDistance | CurveKind::MagnitudeVsTime
        )
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveKind {
    type Err = CometaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        CurveKind::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| {
                CometaError::InvalidParameter(format!(
                    "unknown curve kind '{s}', expected one of: {}",
                    CurveKind::ALL.iter().join(", ")
                ))
            })
    }
}

/// Physical inputs shared by the four curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveInputs {
    /// `Afρ` at the reference distance (cm).
    pub afrho0: f64,
    /// Reference heliocentric distance (au).
    pub r0: f64,
    /// Power-law slope of `Afρ` with distance.
    pub k: f64,
    /// Absolute magnitude.
    pub abs_magnitude: f64,
    /// Activity index of the magnitude law.
    pub slope_n: f64,
    /// Geocentric distance (au).
    pub delta: f64,
}

/// Sampling grid and model constants of the curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub distance_min_au: f64,
    pub distance_max_au: f64,
    pub time_min_days: f64,
    pub time_max_days: f64,
    pub samples: usize,
    /// Width of the Gaussian activity peak (days).
    pub tau_days: f64,
    /// Radial drift used by the time light curve (au/day).
    pub drift_au_per_day: f64,
    /// Floor on the drifting distance (au).
    pub min_distance_au: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        CurveParams {
            distance_min_au: 0.1,
            distance_max_au: 5.0,
            time_min_days: -50.0,
            time_max_days: 50.0,
            samples: 100,
            tau_days: 10.0,
            drift_au_per_day: 0.01,
            min_distance_au: 1e-3,
        }
    }
}

/// A sampled curve ready to be plotted or exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub kind: CurveKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub invert_y: bool,
}

/// `samples` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn magnitude(inputs: &CurveInputs, r: f64) -> f64 {
    inputs.abs_magnitude + 5.0 * inputs.delta.log10() + 2.5 * inputs.slope_n * r.log10()
}

/// Sample one of the model curves.
///
/// Arguments
/// -----------------
/// * `kind` – Which curve to produce.
/// * `inputs` – Physical inputs; `r0` must be > 0 for the distance `Afρ` curve and the time
///   light curve, `delta` must be > 0 for the magnitude curves.
/// * `params` – Sampling grid (at least two samples).
///
/// Errors
/// ----------
/// * Validation errors naming the offending input.
/// * [`CometaError::Computation`] if any sample is not finite.
pub fn generate(
    kind: CurveKind,
    inputs: &CurveInputs,
    params: &CurveParams,
) -> Result<PlotSeries, CometaError> {
    if params.samples < 2 {
        return Err(CometaError::InvalidParameter(
            "curves need at least 2 samples".into(),
        ));
    }
    require_finite("afrho0", inputs.afrho0)?;
    require_finite("k", inputs.k)?;
    require_finite("H", inputs.abs_magnitude)?;
    require_finite("n", inputs.slope_n)?;
    if matches!(kind, CurveKind::AfrhoVsDistance | CurveKind::MagnitudeVsTime) {
        require_positive("r0", inputs.r0)?;
    }
    if kind.is_magnitude() {
        require_positive("delta", inputs.delta)?;
    }

    let (x, y, x_label, y_label, title): (Vec<f64>, Vec<f64>, &str, &str, &str) = match kind {
        CurveKind::AfrhoVsDistance => {
            let r = linspace(params.distance_min_au, params.distance_max_au, params.samples);
            let y = r
                .iter()
                .map(|&ri| inputs.afrho0 * (ri / inputs.r0).powf(-inputs.k))
                .collect();
            (r, y, "Heliocentric distance (au)", "Afρ", "Afρ versus distance")
        }
        CurveKind::MagnitudeVsDistance => {
            let r = linspace(params.distance_min_au, params.distance_max_au, params.samples);
            let y = r.iter().map(|&ri| magnitude(inputs, ri)).collect();
            (
                r,
                y,
                "Heliocentric distance (au)",
                "Magnitude (m)",
                "Magnitude versus distance",
            )
        }
        CurveKind::AfrhoVsTime => {
            let t = linspace(params.time_min_days, params.time_max_days, params.samples);
            let two_tau2 = 2.0 * params.tau_days.powi(2);
            let y = t
                .iter()
                .map(|&ti| inputs.afrho0 * (-ti.powi(2) / two_tau2).exp())
                .collect();
            (t, y, "Time (days)", "Afρ", "Afρ versus time")
        }
        CurveKind::MagnitudeVsTime => {
            let t = linspace(params.time_min_days, params.time_max_days, params.samples);
            let y = t
                .iter()
                .map(|&ti| {
                    let r = (inputs.r0 + params.drift_au_per_day * ti).max(params.min_distance_au);
                    magnitude(inputs, r)
                })
                .collect();
            (t, y, "Time (days)", "Magnitude (m)", "Magnitude versus time")
        }
    };

    for v in &y {
        ensure_finite(kind.as_str(), *v)?;
    }
    debug!("generated {} curve with {} samples", kind, y.len());

    Ok(PlotSeries {
        kind,
        x,
        y,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        title: title.to_string(),
        invert_y: kind.is_magnitude(),
    })
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Write the series as a two-column CSV (`x_label,y_label` header).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CometaError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([self.x_label.as_str(), self.y_label.as_str()])?;
        for (x, y) in self.x.iter().zip_eq(self.y.iter()) {
            wtr.write_record([x.to_string(), y.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv(&self, path: &Utf8Path) -> Result<(), CometaError> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

impl fmt::Display for PlotSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y_min, y_max) = self
            .y
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "  {} samples, x: {} in [{:.3}, {:.3}]",
            self.len(),
            self.x_label,
            self.x.first().copied().unwrap_or(f64::NAN),
            self.x.last().copied().unwrap_or(f64::NAN)
        )?;
        write!(
            f,
            "  y: {} in [{:.3}, {:.3}]{}",
            self.y_label,
            y_min,
            y_max,
            if self.invert_y { " (inverted axis)" } else { "" }
        )
    }
}

#[cfg(test)]
mod curves_test {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> CurveInputs {
        CurveInputs {
            afrho0: 1000.0,
            r0: 1.0,
            k: 2.0,
            abs_magnitude: 10.0,
            slope_n: 4.0,
            delta: 1.0,
        }
    }

    #[test]
    fn test_linspace() {
        let v = linspace(0.1, 5.0, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[99], 5.0);
        assert_relative_eq!(v[1] - v[0], 4.9 / 99.0, max_relative = 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_afrho_vs_distance() {
        let s = generate(CurveKind::AfrhoVsDistance, &inputs(), &CurveParams::default()).unwrap();
        assert_eq!(s.len(), 100);
        assert!(!s.invert_y);
        assert_relative_eq!(s.y[0], 1000.0 * 0.1f64.powf(-2.0), max_relative = 1e-12);
        assert_relative_eq!(s.y[99], 1000.0 / 25.0, max_relative = 1e-12);
        assert!(s.y.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_magnitude_vs_distance() {
        let s = generate(CurveKind::MagnitudeVsDistance, &inputs(), &CurveParams::default())
            .unwrap();
        assert!(s.invert_y);
        // 10 + 0 + 10·log10(0.1)
        assert_relative_eq!(s.y[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.y[99], 10.0 + 10.0 * 5f64.log10(), max_relative = 1e-12);
    }

    #[test]
    fn test_afrho_vs_time_peaks_at_zero() {
        let params = CurveParams {
            samples: 101,
            ..CurveParams::default()
        };
        let s = generate(CurveKind::AfrhoVsTime, &inputs(), &params).unwrap();
        assert_relative_eq!(s.x[50], 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.y[50], 1000.0, max_relative = 1e-12);
        assert_relative_eq!(s.y[0], 1000.0 * (-12.5f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_magnitude_vs_time_clamps_distance() {
        let near = CurveInputs {
            r0: 0.2,
            ..inputs()
        };
        let s = generate(CurveKind::MagnitudeVsTime, &near, &CurveParams::default()).unwrap();
        // r0 + 0.01·(-50) < 0, clamped to 1e-3 au
        assert_relative_eq!(s.y[0], 10.0 + 10.0 * 1e-3f64.log10(), max_relative = 1e-12);
        assert!(s.y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_invalid_inputs() {
        let bad_delta = CurveInputs {
            delta: 0.0,
            ..inputs()
        };
        assert_eq!(
            generate(CurveKind::MagnitudeVsDistance, &bad_delta, &CurveParams::default()),
            Err(CometaError::non_positive("delta", 0.0))
        );
        // Afρ curves never use delta
        assert!(generate(CurveKind::AfrhoVsTime, &bad_delta, &CurveParams::default()).is_ok());

        let few = CurveParams {
            samples: 1,
            ..CurveParams::default()
        };
        assert!(generate(CurveKind::AfrhoVsTime, &inputs(), &few).is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "afrho-distance".parse::<CurveKind>().unwrap(),
            CurveKind::AfrhoVsDistance
        );
        assert_eq!(
            "Magnitude_Time".parse::<CurveKind>().unwrap(),
            CurveKind::MagnitudeVsTime
        );
        assert!("spectrum".parse::<CurveKind>().is_err());
        for kind in CurveKind::ALL {
            assert_eq!(kind.to_string().parse::<CurveKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_write_csv() {
        let params = CurveParams {
            samples: 3,
            ..CurveParams::default()
        };
        let s = generate(CurveKind::AfrhoVsTime, &inputs(), &params).unwrap();
        let mut buf = Vec::new();
        s.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Time (days),Afρ");
        assert_eq!(lines[2], "0,1000");
    }
}
