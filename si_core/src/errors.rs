//! # Error Types
//!
//! Structured error types for si_core. Statically typed [`Quantity`](crate::Quantity)
//! values reject dimension errors at compile time, so these errors only surface
//! where a dimension is known at run time: [`DynQuantity`](crate::DynQuantity),
//! unit literal parsing and JSON input.
//!
//! ## Example
//!
//! ```rust
//! use si_core::errors::{UnitError, UnitResult};
//! use si_core::DimensionVector;
//!
//! fn require_length(dim: DimensionVector) -> UnitResult<()> {
//!     let length = DimensionVector::new(1, 0, 0, 0, 0, 0, 0);
//!     if dim != length {
//!         return Err(UnitError::dimension_mismatch("require_length", dim, length));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_length(DimensionVector::SCALAR).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimension::DimensionVector;

/// Result type alias for si_core operations
pub type UnitResult<T> = Result<T, UnitError>;

/// Structured error type for dimension-checked operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum UnitError {
    /// Add, subtract, compare or atan2 across different dimensions
    #[error("Dimension mismatch in {operation}: {lhs} vs {rhs}")]
    DimensionMismatch {
        operation: String,
        lhs: DimensionVector,
        rhs: DimensionVector,
    },

    /// Square root of a dimension with an odd exponent
    #[error("Invalid root dimension: {dimension} has an odd exponent")]
    InvalidRootDimension { dimension: DimensionVector },

    /// A quantity whose value is itself a quantity
    #[error("Illegal nesting: {context}")]
    IllegalNesting { context: String },

    /// Conversion of a dimensioned quantity to a bare number
    #[error("Cannot convert {dimension} to a bare number, only dimensionless quantities convert implicitly")]
    NonScalarConversion { dimension: DimensionVector },

    /// An exponent left the supported range
    #[error("Exponent overflow in {operation}: {lhs} and {rhs}")]
    ExponentOverflow {
        operation: String,
        lhs: DimensionVector,
        rhs: DimensionVector,
    },

    /// Unit name not present in the catalog
    #[error("Unknown unit: {name}")]
    UnknownUnit { name: String },

    /// Prefix symbol not present in the prefix table
    #[error("Unknown prefix: {prefix}")]
    UnknownPrefix { prefix: String },

    /// Malformed expression or literal
    #[error("Parse error at {position} in '{input}': {reason}")]
    ParseError {
        input: String,
        position: usize,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl UnitError {
    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(operation: impl Into<String>, lhs: DimensionVector, rhs: DimensionVector) -> Self {
        UnitError::DimensionMismatch {
            operation: operation.into(),
            lhs,
            rhs,
        }
    }

    /// Create an InvalidRootDimension error
    pub fn invalid_root(dimension: DimensionVector) -> Self {
        UnitError::InvalidRootDimension { dimension }
    }

    /// Create an IllegalNesting error
    pub fn illegal_nesting(context: impl Into<String>) -> Self {
        UnitError::IllegalNesting {
            context: context.into(),
        }
    }

    /// Create an ExponentOverflow error
    pub fn exponent_overflow(operation: impl Into<String>, lhs: DimensionVector, rhs: DimensionVector) -> Self {
        UnitError::ExponentOverflow {
            operation: operation.into(),
            lhs,
            rhs,
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(name: impl Into<String>) -> Self {
        UnitError::UnknownUnit { name: name.into() }
    }

    /// Create an UnknownPrefix error
    pub fn unknown_prefix(prefix: impl Into<String>) -> Self {
        UnitError::UnknownPrefix {
            prefix: prefix.into(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(input: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        UnitError::ParseError {
            input: input.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Whether the error comes from the dimension algebra itself (as opposed
    /// to malformed input)
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            UnitError::DimensionMismatch { .. }
                | UnitError::InvalidRootDimension { .. }
                | UnitError::IllegalNesting { .. }
                | UnitError::NonScalarConversion { .. }
                | UnitError::ExponentOverflow { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            UnitError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            UnitError::InvalidRootDimension { .. } => "INVALID_ROOT_DIMENSION",
            UnitError::IllegalNesting { .. } => "ILLEGAL_NESTING",
            UnitError::NonScalarConversion { .. } => "NON_SCALAR_CONVERSION",
            UnitError::ExponentOverflow { .. } => "EXPONENT_OVERFLOW",
            UnitError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            UnitError::UnknownPrefix { .. } => "UNKNOWN_PREFIX",
            UnitError::ParseError { .. } => "PARSE_ERROR",
            UnitError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for UnitError {
    fn from(err: serde_json::Error) -> Self {
        UnitError::SerializationError {
            reason: err.to_string(),
        }
    }
}
