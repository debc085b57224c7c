//! Composite shapes — ordered, weighted lists of transform invocations.

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;
use crate::params::{LinearParams, QuantizedSigmoidParams, SigmoidParams};

// ── Component Kind ──────────────────────────────────────────────────

/// Discriminant of a shape component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Sigmoid,
    Linear,
    QuantizedSigmoid,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sigmoid => write!(f, "sigmoid"),
            Self::Linear => write!(f, "linear"),
            Self::QuantizedSigmoid => write!(f, "quantized-sigmoid"),
        }
    }
}

// ── Component ───────────────────────────────────────────────────────

/// Parameters of one component, tagged by transform kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComponentParams {
    Sigmoid(SigmoidParams),
    Linear(LinearParams),
    QuantizedSigmoid(QuantizedSigmoidParams),
}

impl ComponentParams {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Sigmoid(_) => ComponentKind::Sigmoid,
            Self::Linear(_) => ComponentKind::Linear,
            Self::QuantizedSigmoid(_) => ComponentKind::QuantizedSigmoid,
        }
    }
}

/// One weighted transform invocation within a composite shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub params: ComponentParams,
    pub weight: f64,
}

impl Component {
    pub fn sigmoid(params: SigmoidParams, weight: f64) -> Self {
        Self {
            params: ComponentParams::Sigmoid(params),
            weight,
        }
    }

    pub fn linear(params: LinearParams, weight: f64) -> Self {
        Self {
            params: ComponentParams::Linear(params),
            weight,
        }
    }

    pub fn quantized(params: QuantizedSigmoidParams, weight: f64) -> Self {
        Self {
            params: ComponentParams::QuantizedSigmoid(params),
            weight,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.params.kind()
    }

    /// Check finiteness of every field and positivity of the quantum
    /// factor.
    pub fn validate(&self) -> Result<(), ComponentError> {
        if !self.weight.is_finite() {
            return Err(ComponentError::NonFiniteWeight { value: self.weight });
        }
        match &self.params {
            ComponentParams::Sigmoid(s) => validate_sigmoid(s, self.kind()),
            ComponentParams::Linear(l) => validate_linear(l, self.kind()),
            ComponentParams::QuantizedSigmoid(q) => {
                if q.quantum_factor == 0 {
                    return Err(ComponentError::ZeroQuantumFactor);
                }
                validate_sigmoid(&q.sigmoid, self.kind())
            }
        }
    }
}

fn validate_sigmoid(s: &SigmoidParams, kind: ComponentKind) -> Result<(), ComponentError> {
    if s.n == 0 {
        return Err(ComponentError::ZeroExponent);
    }
    for (field, value) in [("k", s.k), ("x0", s.x0), ("alpha", s.alpha)] {
        if !value.is_finite() {
            return Err(ComponentError::NonFiniteParam { kind, field, value });
        }
    }
    Ok(())
}

fn validate_linear(l: &LinearParams, kind: ComponentKind) -> Result<(), ComponentError> {
    for (field, value) in [("beta", l.beta), ("gamma", l.gamma)] {
        if !value.is_finite() {
            return Err(ComponentError::NonFiniteParam { kind, field, value });
        }
    }
    Ok(())
}

// ── Composite Shape ─────────────────────────────────────────────────

/// An ordered, weighted list of components whose summed output
/// approximates a target curve.
///
/// Immutable once catalogued; interpolation pairs components by index, so
/// the ordering is part of the shape's identity.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeShape {
    pub components: Vec<Component>,
}

impl CompositeShape {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Validate every component.
    pub fn validate(&self) -> Result<(), ComponentError> {
        for component in &self.components {
            component.validate()?;
        }
        Ok(())
    }

    /// Kinds of the components, in order.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.components.iter().map(Component::kind).collect()
    }
}
