//! Canonical parameter groups.
//!
//! The parameter set is the single source of coefficients every derived
//! module inherits from. It carries three sigmoid groups, three linear
//! groups, the quantization ladder, and the control coefficients used for
//! blending and self-tuning.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

// ── Primitive coefficient groups ────────────────────────────────────

/// Coefficients of the generalized sigmoid
/// `alpha / (1 + exp(-k * (x - x0)^n))`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    /// Exponent applied to `(x - x0)`; 1 gives the plain logistic curve.
    pub n: u32,
    /// Steepness.
    pub k: f64,
    /// Center.
    pub x0: f64,
    /// Output scale.
    pub alpha: f64,
}

impl SigmoidParams {
    pub const fn new(n: u32, k: f64, x0: f64, alpha: f64) -> Self {
        Self { n, k, x0, alpha }
    }

    fn validate(&self, field: &'static str) -> Result<(), ParameterError> {
        if self.n == 0 {
            return Err(ParameterError::ZeroExponent { field });
        }
        for value in [self.k, self.x0, self.alpha] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

/// Coefficients of the affine transform `beta * x + gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub beta: f64,
    pub gamma: f64,
}

impl LinearParams {
    pub const fn new(beta: f64, gamma: f64) -> Self {
        Self { beta, gamma }
    }

    fn validate(&self, field: &'static str) -> Result<(), ParameterError> {
        for value in [self.beta, self.gamma] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

/// A sigmoid whose output is snapped onto `quantum_factor` discrete levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantizedSigmoidParams {
    pub sigmoid: SigmoidParams,
    /// Number of quantization levels; must be at least 1.
    pub quantum_factor: u32,
}

impl QuantizedSigmoidParams {
    pub const fn new(sigmoid: SigmoidParams, quantum_factor: u32) -> Self {
        Self {
            sigmoid,
            quantum_factor,
        }
    }
}

/// Blending and self-tuning coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlParams {
    /// Blend ratio between the sigmoid branch and the linear/quantized
    /// branch of the combined transform. Defaults to the golden ratio
    /// conjugate.
    pub harmony: f64,
    /// Base step size for parameter evolution.
    pub evolution_rate: f64,
    /// Convergence tolerance for tuning procedures.
    pub stability_threshold: f64,
    /// How aggressively adaptation is allowed to reshape coefficients.
    pub adaptation_flexibility: f64,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            harmony: 0.618,
            evolution_rate: 0.01,
            stability_threshold: 0.001,
            adaptation_flexibility: 0.5,
        }
    }
}

impl ControlParams {
    fn validate(&self) -> Result<(), ParameterError> {
        for (field, value) in [
            ("control.harmony", self.harmony),
            ("control.evolution_rate", self.evolution_rate),
            ("control.stability_threshold", self.stability_threshold),
            (
                "control.adaptation_flexibility",
                self.adaptation_flexibility,
            ),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.harmony) {
            return Err(ParameterError::HarmonyOutOfRange {
                value: self.harmony,
            });
        }
        Ok(())
    }
}

// ── Parameter Set ───────────────────────────────────────────────────

/// The canonical coefficient set.
///
/// Owned exclusively by the parameter store; everything outside the store
/// works on cloned snapshots or scaled inheritance packages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub sigmoid_base: SigmoidParams,
    pub sigmoid_shape: SigmoidParams,
    pub sigmoid_adaptive: SigmoidParams,
    pub linear_base: LinearParams,
    pub linear_shape: LinearParams,
    pub linear_adaptive: LinearParams,
    /// Quantization ladder; strictly increasing positive integers.
    pub quantum_factors: Vec<u32>,
    pub control: ControlParams,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            sigmoid_base: SigmoidParams::new(1, 1.0, 0.0, 1.0),
            sigmoid_shape: SigmoidParams::new(2, 2.0, 0.0, 1.618),
            sigmoid_adaptive: SigmoidParams::new(1, 1.5, 0.0, 1.0),
            linear_base: LinearParams::new(1.0, 0.0),
            linear_shape: LinearParams::new(1.618, 0.0),
            linear_adaptive: LinearParams::new(1.0, 0.0),
            quantum_factors: vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024],
            control: ControlParams::default(),
        }
    }
}

impl ParameterSet {
    /// Check every invariant: finiteness of all coefficients and a
    /// strictly increasing, positive quantization ladder.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.sigmoid_base.validate("sigmoid_base")?;
        self.sigmoid_shape.validate("sigmoid_shape")?;
        self.sigmoid_adaptive.validate("sigmoid_adaptive")?;
        self.linear_base.validate("linear_base")?;
        self.linear_shape.validate("linear_shape")?;
        self.linear_adaptive.validate("linear_adaptive")?;
        self.control.validate()?;

        if self.quantum_factors.is_empty() {
            return Err(ParameterError::EmptyQuantumFactors);
        }
        for (index, &factor) in self.quantum_factors.iter().enumerate() {
            if factor == 0 {
                return Err(ParameterError::ZeroQuantumFactor { index });
            }
            if index > 0 {
                let prev = self.quantum_factors[index - 1];
                if prev >= factor {
                    return Err(ParameterError::NonIncreasingQuantumFactors {
                        index,
                        prev,
                        next: factor,
                    });
                }
            }
        }
        Ok(())
    }

    /// Largest quantization factor in the ladder.
    pub fn max_quantum_factor(&self) -> u32 {
        self.quantum_factors.iter().copied().max().unwrap_or(1)
    }

    /// Mutable access to all three sigmoid groups, for uniform tuning.
    pub fn sigmoid_groups_mut(&mut self) -> [&mut SigmoidParams; 3] {
        [
            &mut self.sigmoid_base,
            &mut self.sigmoid_shape,
            &mut self.sigmoid_adaptive,
        ]
    }

    /// Mutable access to all three linear groups.
    pub fn linear_groups_mut(&mut self) -> [&mut LinearParams; 3] {
        [
            &mut self.linear_base,
            &mut self.linear_shape,
            &mut self.linear_adaptive,
        ]
    }
}
