//! # Parameter files
//!
//! Plain-text files of `KEY = value` lines carrying the observational parameters of a
//! comet, for instance:
//!
//! ```text
//! # 67P, March run
//! R0     = 1.25
//! REARTH = 6.4e5     # km
//! MK     = 9.3
//! ```
//!
//! Upper-case keys are mapped onto the field names used by the calculators:
//!
//! | File key  | Field          | File key  | Field          |
//! |-----------|----------------|-----------|----------------|
//! | `T`       | `T`            | `DELTA`   | `delta`        |
//! | `R0`      | `r0`           | `MK`      | `m_k`          |
//! | `REARTH`  | `r_earth`      | `R`       | `r`            |
//! | `AFRHO0`  | `afrho0`       | `PV`      | `pv`           |
//! | `K`       | `k`            | `ANGSIZE` | `angular_size` |
//! | `H`       | `H`            | `N`       | `n`            |
//!
//! Unknown keys are kept verbatim. Blank lines, `#` comments and lines without `=` are
//! ignored; a line with `=` whose value is not a finite number is a parse error.
use std::{collections::BTreeMap, fmt, fs};

use camino::Utf8Path;
use log::debug;
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::space0,
    combinator::{all_consuming, opt, rest},
    number::complete::double,
    sequence::{delimited, preceded, separated_pair, terminated},
    IResult, Parser,
};

use crate::{
    cometa_errors::CometaError,
    curves::CurveInputs,
    distance::Distance,
    nucleus::NucleusInput,
    photometry::MassInput,
    sublimation::SublimationInput,
};

/// Map a file key onto its canonical field name.
pub fn canonical_key(key: &str) -> &str {
    match key {
        "T" => "T",
        "R0" => "r0",
        "REARTH" => "r_earth",
        "AFRHO0" => "afrho0",
        "K" => "k",
        "H" => "H",
        "N" => "n",
        "DELTA" => "delta",
        "MK" => "m_k",
        "R" => "r",
        "PV" => "pv",
        "ANGSIZE" => "angular_size",
        other => other,
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn parse_entry(input: &str) -> IResult<&str, (&str, f64)> {
    all_consuming(delimited(
        space0,
        separated_pair(
            take_while1(is_key_char),
            delimited(space0, tag("="), space0),
            double,
        ),
        terminated(space0, opt(preceded(tag("#"), rest))),
    ))
    .parse(input)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamFile {
    values: BTreeMap<String, f64>,
}

impl ParamFile {
    /// Parse the content of a parameter file.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::NomParsingError`] carrying the line number and text of the first
    ///   malformed `KEY = value` line.
    pub fn parse(content: &str) -> Result<Self, CometaError> {
        let mut values = BTreeMap::new();
        for (lineno, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if !trimmed.contains('=') {
                debug!("ignoring line {} without '=': {trimmed}", lineno + 1);
                continue;
            }
            let (_, (key, value)) = parse_entry(trimmed)
                .map_err(|_| CometaError::NomParsingError(format!("line {}: {trimmed}", lineno + 1)))?;
            if !value.is_finite() {
                return Err(CometaError::NomParsingError(format!(
                    "line {}: {trimmed}",
                    lineno + 1
                )));
            }
            values.insert(canonical_key(key).to_string(), value);
        }
        Ok(ParamFile { values })
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, CometaError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn require(&self, field: &str) -> Result<f64, CometaError> {
        self.get(field)
            .ok_or_else(|| CometaError::MissingField(field.to_string()))
    }

    /// Sublimation input from `r0`, `r_earth` (km) and the optional `T`.
    pub fn sublimation_input(&self) -> Result<SublimationInput, CometaError> {
        SublimationInput::new(
            self.require("r0")?,
            Distance::kilometers(self.require("r_earth")?),
            self.get("T"),
        )
    }

    /// Mass input from `m_k`, `delta` and `r`.
    pub fn mass_input(&self) -> Result<MassInput, CometaError> {
        Ok(MassInput {
            magnitude: self.require("m_k")?,
            delta_au: self.require("delta")?,
            r_au: self.require("r")?,
        })
    }

    /// Nucleus input from `H`, `pv` and the optional `angular_size` and `distance`.
    pub fn nucleus_input(&self) -> Result<NucleusInput, CometaError> {
        Ok(NucleusInput {
            abs_magnitude: self.require("H")?,
            albedo: self.require("pv")?,
            angular_size_arcsec: self.get("angular_size"),
            distance_au: self.get("distance"),
        })
    }

    /// Curve inputs from `afrho0`, `r0`, `k`, `H`, `n` and `delta`.
    pub fn curve_inputs(&self) -> Result<CurveInputs, CometaError> {
        Ok(CurveInputs {
            afrho0: self.require("afrho0")?,
            r0: self.require("r0")?,
            k: self.require("k")?,
            abs_magnitude: self.require("H")?,
            slope_n: self.require("n")?,
            delta: self.require("delta")?,
        })
    }
}

impl fmt::Display for ParamFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key:<14}= {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod param_file_test {
    use super::*;

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("R0 = 1.5"), Ok(("", ("R0", 1.5))));
        assert_eq!(parse_entry("  MK=9.3   # visual"), Ok(("", ("MK", 9.3))));
        assert_eq!(parse_entry("REARTH = 6.4e5"), Ok(("", ("REARTH", 6.4e5))));
        assert!(parse_entry("R0 = abc").is_err());
        assert!(parse_entry("R0 = 1.5 km").is_err());
        assert!(parse_entry("= 1.5").is_err());
    }

    #[test]
    fn test_key_mapping() {
        let p = ParamFile::parse("AFRHO0 = 250\nANGSIZE = 0.4\nFOO = 3").unwrap();
        assert_eq!(p.get("afrho0"), Some(250.0));
        assert_eq!(p.get("angular_size"), Some(0.4));
        assert_eq!(p.get("FOO"), Some(3.0));
        assert_eq!(p.get("AFRHO0"), None);
    }

    #[test]
    fn test_skips_comments_and_free_text() {
        let p = ParamFile::parse("# header\n\nobserved at Terskol\nH = 15\n").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("H"), Some(15.0));
    }

    #[test]
    fn test_bad_value_names_line() {
        let err = ParamFile::parse("H = 15\nPV = high\n").unwrap_err();
        assert_eq!(err, CometaError::NomParsingError("line 2: PV = high".into()));
        assert!(ParamFile::parse("T = inf").is_err());
    }

    #[test]
    fn test_inputs() {
        let p = ParamFile::parse("R0 = 1\nREARTH = 1e6\nMK = 5\nDELTA = 1\nR = 1").unwrap();
        let sub = p.sublimation_input().unwrap();
        assert_eq!(sub.heliocentric_distance_au, 1.0);
        assert_eq!(sub.geocentric_distance, Distance::kilometers(1e6));
        assert_eq!(sub.ambient_temperature_k, None);

        let mass = p.mass_input().unwrap();
        assert_eq!(mass.magnitude, 5.0);

        assert_eq!(
            p.nucleus_input().unwrap_err(),
            CometaError::MissingField("H".into())
        );
    }
}
