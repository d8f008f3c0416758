// src/error.rs
use thiserror::Error;

/// Errors raised by the fdm-pricer library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FdmError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Degenerate mesh or otherwise unusable configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Zero pivot, divergence or non-finite values during the march
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// Failure reported by an injected collaborator (coefficients, boundaries, ...)
    #[error("Provider '{provider}' failed: {reason}")]
    ProviderError { provider: String, reason: String },
}

/// Result type alias for fdm-pricer operations
pub type FdmResult<T> = Result<T, FdmError>;

/// Validation utilities
pub mod validation {
    use super::{FdmError, FdmResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> FdmResult<()> {
        if !value.is_finite() || value <= 0.0 {
            Err(FdmError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> FdmResult<()> {
        if !(min..=max).contains(&value) {
            Err(FdmError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> FdmResult<()> {
        if !value.is_finite() {
            Err(FdmError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a finite-difference bump is usable in either direction
    pub fn validate_nonzero(name: &str, value: f64) -> FdmResult<()> {
        validate_finite(name, value)?;
        if value == 0.0 {
            Err(FdmError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-zero".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a mesh extent against its minimum size
    pub fn validate_mesh_size(field: &str, size: usize, min: usize) -> FdmResult<()> {
        if size < min {
            Err(FdmError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("mesh size {} is below the minimum of {}", size, min),
            })
        } else if size > 10_000_000 {
            Err(FdmError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("mesh size {} exceeds maximum allowed (10 million)", size),
            })
        } else {
            Ok(())
        }
    }
}
