//! Validation errors for the core data model.

use thiserror::Error;

use crate::shape::ComponentKind;

/// Errors raised when a [`crate::ParameterSet`] fails validation.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    /// A coefficient is NaN or infinite.
    #[error("non-finite value in {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// A sigmoid exponent of zero collapses the curve to a constant.
    #[error("sigmoid exponent must be at least 1 in {field}")]
    ZeroExponent { field: &'static str },

    /// The quantum factor list is empty.
    #[error("quantum factor list is empty")]
    EmptyQuantumFactors,

    /// A quantum factor of zero would divide by zero during quantization.
    #[error("quantum factor at index {index} must be at least 1")]
    ZeroQuantumFactor { index: usize },

    /// Quantum factors must form a strictly increasing sequence.
    #[error("quantum factors not strictly increasing at index {index}: {prev} >= {next}")]
    NonIncreasingQuantumFactors { index: usize, prev: u32, next: u32 },

    /// The harmony blend coefficient is outside the unit interval.
    #[error("harmony must lie in [0, 1], got {value}")]
    HarmonyOutOfRange { value: f64 },
}

/// Errors raised when a shape component fails validation.
#[derive(Debug, Error, PartialEq)]
pub enum ComponentError {
    /// A component parameter is NaN or infinite.
    #[error("non-finite {field} in {kind} component: {value}")]
    NonFiniteParam {
        kind: ComponentKind,
        field: &'static str,
        value: f64,
    },

    /// The component weight is NaN or infinite.
    #[error("non-finite component weight: {value}")]
    NonFiniteWeight { value: f64 },

    /// A sigmoid exponent of zero is not a valid curve.
    #[error("sigmoid exponent must be at least 1")]
    ZeroExponent,

    /// Quantization requires a positive factor.
    #[error("quantum factor must be at least 1")]
    ZeroQuantumFactor,
}
