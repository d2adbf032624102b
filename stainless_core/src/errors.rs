//! # Error Types
//!
//! Structured error types for stainless_core. Every fatal condition in a
//! member check maps to one variant, so callers can match on the kind of
//! failure instead of parsing messages.
//!
//! Non-convergence of an iterative solve is *not* an error: it is reported
//! as a [`ConvergenceWarning`] value alongside the best available estimate.
//!
//! ## Example
//!
//! ```rust
//! use stainless_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(t: f64) -> CalcResult<()> {
//!     if t <= 0.0 {
//!         return Err(CalcError::invalid_input("t", t.to_string(), "Thickness must be positive"));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stainless_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input is non-physical or outside the applicability of the design code
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An element classification has no matching effective width formula
    #[error("Unclassified element '{element}': no effective width rule for '{classification}'")]
    UnclassifiedElement {
        element: String,
        classification: String,
    },

    /// The requested limit state is not implemented for this configuration
    #[error("Not supported: {limit_state} - {reason}")]
    NotSupported { limit_state: String, reason: String },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnclassifiedElement error
    pub fn unclassified_element(element: impl Into<String>, classification: impl Into<String>) -> Self {
        CalcError::UnclassifiedElement {
            element: element.into(),
            classification: classification.into(),
        }
    }

    /// Create a NotSupported error
    pub fn not_supported(limit_state: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NotSupported {
            limit_state: limit_state.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnclassifiedElement { .. } => "UNCLASSIFIED_ELEMENT",
            CalcError::NotSupported { .. } => "NOT_SUPPORTED",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Where a non-converged iteration happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IterationKind {
    /// Newton-Raphson on s = FF·η(s)
    CriticalStress,
    /// Neutral-axis fixed point of the effective section
    EffectiveSection,
}

/// Non-fatal signal that an iteration hit its cap before converging.
///
/// The value it accompanies is the last iterate, which is usually close but
/// has not met the requested tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceWarning {
    /// Which iteration gave up
    pub kind: IterationKind,
    /// Label of the calculation that triggered it (e.g. "FTB", "Se @ FY")
    pub context: String,
    /// Iterations performed
    pub iterations: usize,
    /// Relative residual (or step) at the last iterate
    pub residual: f64,
    /// Tolerance that was not reached
    pub tolerance: f64,
}

impl ConvergenceWarning {
    /// Attach a label to a warning raised deep inside a solver
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} '{}' did not converge after {} iterations (residual {:.3e} > tol {:.1e})",
            self.kind, self.context, self.iterations, self.residual, self.tolerance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("D/w", "0.95", "Edge stiffener ratio exceeds 0.8");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unclassified_element("flange", "??").error_code(), "UNCLASSIFIED_ELEMENT");
        assert_eq!(CalcError::not_supported("3.3.1.2.3(ii)", "x").error_code(), "NOT_SUPPORTED");
        assert_eq!(CalcError::material_not_found("SA999").error_code(), "MATERIAL_NOT_FOUND");
        assert!(!CalcError::serialization("bad").is_recoverable());
    }

    #[test]
    fn test_warning_display() {
        let w = ConvergenceWarning {
            kind: IterationKind::CriticalStress,
            context: String::new(),
            iterations: 100,
            residual: 0.02,
            tolerance: 0.001,
        }
        .with_context("FTB");
        let msg = w.to_string();
        assert!(msg.contains("FTB"));
        assert!(msg.contains("100"));
    }
}
