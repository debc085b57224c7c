//! Arbor transform kernel.
//!
//! The three primitive transforms every other subsystem is built from: a
//! generalized bounded sigmoid, an affine transform, and a quantized
//! sigmoid that snaps its output onto a discrete ladder. All functions are
//! pure and deterministic.
//!
//! The sigmoid guards against exponent overflow instead of raising: once
//! the exponent argument leaves `[-700, 700]` the curve has numerically
//! saturated, so the saturation value is returned directly.

#![deny(unsafe_code)]

use arbor_types::{
    Component, ComponentError, ComponentParams, CompositeShape, LinearParams, ParameterSet,
    QuantizedSigmoidParams, SigmoidParams,
};
use thiserror::Error;

/// Exponent-argument magnitude beyond which `exp` would overflow an f64.
const EXP_ARG_LIMIT: f64 = 700.0;

// ── Errors ──────────────────────────────────────────────────────────

/// Errors from transform evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The evaluation point is NaN or infinite.
    #[error("invalid parameter: non-finite input x = {0}")]
    NonFiniteInput(f64),

    /// Quantization requires a positive factor.
    #[error("invalid parameter: quantum factor must be at least 1")]
    ZeroQuantumFactor,

    /// A shape component failed validation.
    #[error("invalid component: {0}")]
    InvalidComponent(#[from] ComponentError),
}

/// Result type for transform evaluation.
pub type TransformResult<T> = Result<T, TransformError>;

// ── Primitive transforms ────────────────────────────────────────────

/// Generalized sigmoid `alpha / (1 + exp(-k * (x - x0)^n))`.
///
/// Returns the saturation value (`alpha` above the center, `0` below)
/// instead of overflowing.
pub fn sigmoid(x: f64, params: &SigmoidParams) -> TransformResult<f64> {
    if !x.is_finite() {
        return Err(TransformError::NonFiniteInput(x));
    }

    let term = x - params.x0;
    // Integer powers keep the sign for odd n and drop it for even n.
    let powered = term.powi(params.n as i32);
    let exp_arg = -params.k * powered;

    if exp_arg > EXP_ARG_LIMIT {
        Ok(0.0)
    } else if exp_arg < -EXP_ARG_LIMIT {
        Ok(params.alpha)
    } else if exp_arg.is_nan() {
        // k == 0 against an overflowed power term; the limit is alpha/2.
        Ok(params.alpha / 2.0)
    } else {
        Ok(params.alpha / (1.0 + exp_arg.exp()))
    }
}

/// Affine transform `beta * x + gamma`.
pub fn linear(x: f64, params: &LinearParams) -> f64 {
    params.beta * x + params.gamma
}

/// Sigmoid snapped onto `quantum_factor` discrete output levels.
pub fn quantized_sigmoid(x: f64, params: &QuantizedSigmoidParams) -> TransformResult<f64> {
    if params.quantum_factor == 0 {
        return Err(TransformError::ZeroQuantumFactor);
    }
    let base = sigmoid(x, &params.sigmoid)?;
    let factor = f64::from(params.quantum_factor);
    Ok((base * factor).round() / factor)
}

// ── Composite evaluation ────────────────────────────────────────────

/// Evaluate a single weighted component at `x`.
pub fn evaluate_component(x: f64, component: &Component) -> TransformResult<f64> {
    component.validate()?;
    let value = match &component.params {
        ComponentParams::Sigmoid(s) => sigmoid(x, s)?,
        ComponentParams::Linear(l) => linear(x, l),
        ComponentParams::QuantizedSigmoid(q) => quantized_sigmoid(x, q)?,
    };
    Ok(component.weight * value)
}

/// Evaluate a composite shape at `x`: the weighted sum of its components.
pub fn evaluate_composite(x: f64, shape: &CompositeShape) -> TransformResult<f64> {
    let mut total = 0.0;
    for component in &shape.components {
        total += evaluate_component(x, component)?;
    }
    Ok(total)
}

/// The combined canonical transform: a harmony-weighted blend of the base
/// sigmoid branch against the linear and quantized branches.
///
/// `h * sigmoid + (1 - h) * (0.5 * linear + 0.5 * quantized)`, where the
/// quantized branch uses the finest factor in the set's ladder.
pub fn blended_transform(x: f64, set: &ParameterSet) -> TransformResult<f64> {
    let h = set.control.harmony;
    let s = sigmoid(x, &set.sigmoid_base)?;
    let l = linear(x, &set.linear_base);
    let q = quantized_sigmoid(
        x,
        &QuantizedSigmoidParams::new(set.sigmoid_base, set.max_quantum_factor()),
    )?;
    Ok(h * s + (1.0 - h) * (0.5 * l + 0.5 * q))
}
