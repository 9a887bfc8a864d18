//! Error types for the analysis engines
//!
//! The engines assume clean numeric inputs, so every call validates its
//! inputs up front and fails the whole call rather than letting a NaN or an
//! impossible assumption poison the year loop.

use thiserror::Error;

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Everything that can go wrong while preparing or running an analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An input value is non-finite or out of its allowed range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Analysis horizon must be between one year and the engine cap
    #[error(
        "Invalid analysis timeframe: {years} years (must be between 1 and {max})",
        max = crate::assumptions::MAX_ANALYSIS_YEARS
    )]
    InvalidTimeframe { years: i64 },

    /// Discounting at or below -100% divides by zero or flips sign
    #[error("Invalid discount rate: {rate}% (must be greater than -100%)")]
    InvalidDiscountRate { rate: f64 },

    /// Typed field update with a key the entity does not have
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: String, field: String },

    /// Recommendation requested on a series shorter than the horizon
    #[error("Series for '{strategy}' has {actual} entries, expected at least {expected}")]
    IncompleteSeries {
        strategy: String,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalysisError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AnalysisError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        AnalysisError::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &str, value: f64) -> AnalysisResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid_input(field, value, "must be a finite number"))
    }
}

/// Reject non-finite and negative monetary amounts
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> AnalysisResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(AnalysisError::invalid_input(field, value, "must not be negative"));
    }
    Ok(())
}
