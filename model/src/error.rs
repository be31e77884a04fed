use std::{error::Error, fmt};

/// The model module's result type.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// Request validation and inference failures.
#[derive(Debug)]
pub enum ModelErr {
    NotAnObject,
    MissingField {
        field: &'static str,
    },
    NotAnInteger {
        field: &'static str,
    },
    NotAString {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        got: i64,
    },
    UnknownCategory {
        field: &'static str,
        got: String,
    },
    FeatureLengthMismatch {
        got: usize,
        expected: usize,
    },
    NonFiniteScore,
}

impl fmt::Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::NotAnObject => write!(f, "record is not a JSON object"),
            ModelErr::MissingField { field } => write!(f, "missing field: {field}"),
            ModelErr::NotAnInteger { field } => write!(f, "field {field} must be an integer"),
            ModelErr::NotAString { field } => write!(f, "field {field} must be a string"),
            ModelErr::OutOfRange {
                field,
                min,
                max,
                got,
            } => write!(
                f,
                "field {field} out of range: got {got}, expected [{min}, {max}]"
            ),
            ModelErr::UnknownCategory { field, got } => {
                write!(f, "unknown value for {field}: '{got}'")
            }
            ModelErr::FeatureLengthMismatch { got, expected } => write!(
                f,
                "feature vector length mismatch: got {got}, expected {expected}"
            ),
            ModelErr::NonFiniteScore => write!(f, "model produced a non-finite score"),
        }
    }
}

impl Error for ModelErr {}
