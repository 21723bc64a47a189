//! Observed `(x, y)` points overlaid on the model curves.
//!
//! Points come either from two free-text lists (one for `x`, one for `y`) or from a
//! two-column text file.
use std::fs;

use camino::Utf8Path;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cometa_errors::CometaError;

static FILE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,\s]+").expect("valid separator regex"));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Split one free-text list into tokens.
///
/// Text with commas and no spaces is split on commas, keeping empty tokens so that
/// `"1,,2"` is reported as malformed. Anything else is split on commas and whitespace.
fn split_tokens(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.contains(',') && !text.contains(' ') {
        text.split(',').collect()
    } else {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

fn parse_tokens(tokens: &[&str]) -> Result<Vec<f64>, CometaError> {
    tokens
        .iter()
        .map(|t| {
            t.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CometaError::InvalidPoints(format!("'{t}' is not a number")))
        })
        .collect()
}

impl PointSet {
    /// Build a point set from two free-text lists.
    ///
    /// Errors
    /// ----------
    /// * [`CometaError::InvalidPoints`] when a list is empty, the lists differ in length,
    ///   fewer than two points are given, or a token is not numeric.
    pub fn from_text(x_text: &str, y_text: &str) -> Result<Self, CometaError> {
        let xs = split_tokens(x_text);
        let ys = split_tokens(y_text);
        if xs.is_empty() || ys.is_empty() {
            return Err(CometaError::InvalidPoints(
                "both X and Y lists are required".into(),
            ));
        }
        if xs.len() != ys.len() {
            return Err(CometaError::InvalidPoints(format!(
                "X and Y must have the same number of points ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(CometaError::InvalidPoints(
                "at least 2 points are required".into(),
            ));
        }
        Ok(PointSet {
            x: parse_tokens(&xs)?,
            y: parse_tokens(&ys)?,
        })
    }

    /// Parse the content of a two-column point file.
    ///
    /// Columns may be separated by `;`, `,` or whitespace. Only the first two values of a
    /// line are used; lines that do not start with two numbers are skipped.
    pub fn parse_file_content(content: &str) -> Result<Self, CometaError> {
        let mut points = PointSet::default();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = FILE_SEPARATORS.split(line).filter(|t| !t.is_empty());
            match (parts.next(), parts.next()) {
                (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
                    (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => {
                        points.x.push(x);
                        points.y.push(y);
                    }
                    _ => debug!("skipping line {}: not numeric", lineno + 1),
                },
                _ => debug!("skipping line {}: fewer than two columns", lineno + 1),
            }
        }
        if points.len() < 2 {
            return Err(CometaError::InvalidPoints(format!(
                "malformed point data: {} valid point(s), at least 2 required",
                points.len()
            )));
        }
        Ok(points)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, CometaError> {
        let content = fs::read_to_string(path)?;
        Self::parse_file_content(&content)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
mod points_test {
    use super::*;

    #[test]
    fn test_comma_lists() {
        let p = PointSet::from_text("1,2,3", "4,5,6").unwrap();
        assert_eq!(p.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(p.y, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_mixed_separators() {
        let p = PointSet::from_text("1, 2 3", " 4 5,\t6 ").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.iter().last(), Some((3.0, 6.0)));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            PointSet::from_text("", "1 2"),
            Err(CometaError::InvalidPoints(_))
        ));
        let err = PointSet::from_text("1 2 3", "1 2").unwrap_err();
        assert!(err.to_string().contains("same number"));
        let err = PointSet::from_text("1", "2").unwrap_err();
        assert!(err.to_string().contains("at least 2"));
        let err = PointSet::from_text("1 a", "2 3").unwrap_err();
        assert!(err.to_string().contains("'a'"));
        assert!(PointSet::from_text("1,,2", "1,2,3").is_err());
    }

    #[test]
    fn test_file_content() {
        let content = "# r  afrho\n0.5;120\n1.0, 80\n\nbad line\n2.0 40 extra\n3.0\n";
        let p = PointSet::parse_file_content(content).unwrap();
        assert_eq!(p.x, vec![0.5, 1.0, 2.0]);
        assert_eq!(p.y, vec![120.0, 80.0, 40.0]);
    }

    #[test]
    fn test_file_content_too_short() {
        assert!(matches!(
            PointSet::parse_file_content("1 2\nfoo bar\n"),
            Err(CometaError::InvalidPoints(_))
        ));
    }
}
