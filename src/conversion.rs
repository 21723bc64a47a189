//! Text → number helpers shared by every calculator.
//!
//! All user-facing inputs arrive as text (CLI flags, request fields, parameter files).
//! These helpers turn them into validated `f64` values and map failures onto the
//! [`CometaError`] validation variants, always naming the offending field.
use crate::cometa_errors::CometaError;

/// Parse a required numeric field.
///
/// Arguments
/// -----------------
/// * `field` – Canonical field name, used in error messages.
/// * `text` – Raw text; surrounding whitespace is ignored.
///
/// Return
/// ----------
/// * The parsed finite value.
///
/// Errors
/// ----------
/// * [`CometaError::MissingField`] if `text` is blank.
/// * [`CometaError::InvalidNumber`] if `text` is not a finite float (`"inf"` and `"NaN"` are rejected).
pub(crate) fn parse_number(field: &str, text: &str) -> Result<f64, CometaError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CometaError::MissingField(field.to_string()));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CometaError::invalid_number(field, trimmed)),
    }
}

/// Parse a required, strictly positive numeric field.
///
/// See also
/// ------------
/// * [`parse_number`] – Underlying parser.
/// * [`require_positive`] – Positivity check on an already parsed value.
pub(crate) fn parse_positive(field: &str, text: &str) -> Result<f64, CometaError> {
    let value = parse_number(field, text)?;
    require_positive(field, value)
}

/// Parse an optional, strictly positive numeric field.
///
/// `None` and blank text both mean "not supplied". Text that is present but malformed is
/// an error, never silently treated as absent.
pub(crate) fn parse_optional_positive(
    field: &str,
    text: Option<&str>,
) -> Result<Option<f64>, CometaError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => parse_positive(field, t).map(Some),
    }
}

/// Check that an already parsed value is finite and strictly positive.
pub(crate) fn require_positive(field: &str, value: f64) -> Result<f64, CometaError> {
    if !value.is_finite() {
        return Err(CometaError::invalid_number(field, &value.to_string()));
    }
    if value <= 0.0 {
        return Err(CometaError::non_positive(field, value));
    }
    Ok(value)
}

/// Check that an already parsed value is finite.
pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64, CometaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CometaError::invalid_number(field, &value.to_string()))
    }
}

/// Check that a computed quantity is finite.
///
/// Errors
/// ----------
/// * [`CometaError::Computation`] naming `what` when the value is NaN or infinite.
pub(crate) fn ensure_finite(what: &str, value: f64) -> Result<f64, CometaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CometaError::Computation(format!(
            "{what} is not finite ({value})"
        )))
    }
}

#[cfg(test)]
mod conversion_test {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("r_sun", " 1.5 "), Ok(1.5));
        assert_eq!(parse_number("r_sun", "2e-1"), Ok(0.2));
        assert_eq!(
            parse_number("r_sun", "   "),
            Err(CometaError::MissingField("r_sun".into()))
        );
        assert_eq!(
            parse_number("r_sun", "one"),
            Err(CometaError::invalid_number("r_sun", "one"))
        );
        assert_eq!(
            parse_number("r_sun", "inf"),
            Err(CometaError::invalid_number("r_sun", "inf"))
        );
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("T", "150"), Ok(150.0));
        assert_eq!(
            parse_positive("T", "0"),
            Err(CometaError::non_positive("T", 0.0))
        );
        assert_eq!(
            parse_positive("T", "-3.5"),
            Err(CometaError::non_positive("T", -3.5))
        );
    }

    #[test]
    fn test_parse_optional_positive() {
        assert_eq!(parse_optional_positive("T", None), Ok(None));
        assert_eq!(parse_optional_positive("T", Some("  ")), Ok(None));
        assert_eq!(parse_optional_positive("T", Some("200")), Ok(Some(200.0)));
        assert!(parse_optional_positive("T", Some("hot")).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("T_sub", 12.0), Ok(12.0));
        assert!(matches!(
            ensure_finite("T_sub", f64::INFINITY),
            Err(CometaError::Computation(_))
        ));
    }
}
