//! Inheritance profiles — named scaling-factor bundles.
//!
//! A profile decides how strongly each transform axis (sigmoid, linear,
//! quantum) is emphasized in a derived parameter package. Custom factors
//! may override any subset of axes.

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, LineageResult};

// ── Profile ─────────────────────────────────────────────────────────

/// Canonical inheritance profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    /// Every axis inherited at full strength.
    Balanced,
    /// Sigmoid axis emphasized, the others damped.
    SigmoidWeighted,
    /// Linear axis emphasized.
    LinearWeighted,
    /// Quantum axis emphasized.
    QuantumWeighted,
}

impl Profile {
    /// All profiles in canonical order.
    pub fn all() -> &'static [Profile] {
        &[
            Profile::Balanced,
            Profile::SigmoidWeighted,
            Profile::LinearWeighted,
            Profile::QuantumWeighted,
        ]
    }

    /// The scaling-factor bundle this profile stands for.
    pub fn factors(&self) -> ScalingFactors {
        match self {
            Profile::Balanced => ScalingFactors::new(1.0, 1.0, 1.0),
            Profile::SigmoidWeighted => ScalingFactors::new(1.5, 0.7, 0.8),
            Profile::LinearWeighted => ScalingFactors::new(0.7, 1.5, 0.8),
            Profile::QuantumWeighted => ScalingFactors::new(0.8, 0.8, 1.5),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => write!(f, "balanced"),
            Self::SigmoidWeighted => write!(f, "sigmoid-weighted"),
            Self::LinearWeighted => write!(f, "linear-weighted"),
            Self::QuantumWeighted => write!(f, "quantum-weighted"),
        }
    }
}

// ── Scaling Factors ─────────────────────────────────────────────────

/// Per-axis multipliers applied to the canonical coefficients when a
/// package is derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingFactors {
    pub sigmoid: f64,
    pub linear: f64,
    pub quantum: f64,
}

impl ScalingFactors {
    pub const fn new(sigmoid: f64, linear: f64, quantum: f64) -> Self {
        Self {
            sigmoid,
            linear,
            quantum,
        }
    }

    /// Apply caller overrides on top of these factors.
    pub fn with_overrides(&self, custom: &CustomFactors) -> ScalingFactors {
        ScalingFactors {
            sigmoid: custom.sigmoid.unwrap_or(self.sigmoid),
            linear: custom.linear.unwrap_or(self.linear),
            quantum: custom.quantum.unwrap_or(self.quantum),
        }
    }

    /// Factors must be finite and positive.
    pub fn validate(&self) -> LineageResult<()> {
        for (axis, value) in [
            ("sigmoid", self.sigmoid),
            ("linear", self.linear),
            ("quantum", self.quantum),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LineageError::InvalidFactor { axis, value });
            }
        }
        Ok(())
    }
}

/// Optional per-axis overrides supplied by the consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFactors {
    pub sigmoid: Option<f64>,
    pub linear: Option<f64>,
    pub quantum: Option<f64>,
}
