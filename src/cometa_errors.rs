use thiserror::Error;

#[derive(Error, Debug)]
pub enum CometaError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid numeric value for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("{field} must be strictly positive (got {value})")]
    NonPositive { field: String, value: f64 },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("Invalid estimator parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown calculation type: {0}")]
    UnknownCalculation(String),

    #[error("Invalid point list: {0}")]
    InvalidPoints(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl CometaError {
    /// `true` for caller mistakes (malformed, missing or out-of-range input),
    /// `false` for internal arithmetic failures and I/O.
    pub fn is_validation(&self) -> bool {
        use CometaError::*;
        matches!(
            self,
            MissingField(_)
                | InvalidNumber { .. }
                | NonPositive { .. }
                | OutOfRange { .. }
                | InvalidParameter(_)
                | UnknownCalculation(_)
                | InvalidPoints(_)
                | NomParsingError(_)
        )
    }

    pub(crate) fn invalid_number(field: &str, value: &str) -> Self {
        CometaError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn non_positive(field: &str, value: f64) -> Self {
        CometaError::NonPositive {
            field: field.to_string(),
            value,
        }
    }
}

impl PartialEq for CometaError {
    fn eq(&self, other: &Self) -> bool {
        use CometaError::*;
        match (self, other) {
            (MissingField(a), MissingField(b)) => a == b,
            (
                InvalidNumber {
                    field: fa,
                    value: va,
                },
                InvalidNumber {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && va == vb,
            (
                NonPositive {
                    field: fa,
                    value: va,
                },
                NonPositive {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && (va == vb || (va.is_nan() && vb.is_nan())),
            (
                OutOfRange {
                    field: fa,
                    reason: ra,
                },
                OutOfRange {
                    field: fb,
                    reason: rb,
                },
            ) => fa == fb && ra == rb,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (UnknownCalculation(a), UnknownCalculation(b)) => a == b,
            (InvalidPoints(a), InvalidPoints(b)) => a == b,
            (Computation(a), Computation(b)) => a == b,
            (NomParsingError(a), NomParsingError(b)) => a == b,

            // Not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
