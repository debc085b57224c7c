//! Seeded shape catalog.
//!
//! The canonical shapes every fresh store starts with. The inheritable
//! shapes are built from the store's own coefficient groups so their
//! parameters track the canonical set at construction time.

use arbor_types::{
    Component, CompositeShape, LinearParams, ParameterSet, QuantizedSigmoidParams, SigmoidParams,
};

/// The general shape — the composite every adaptive consumer derives
/// from: shape sigmoid, shape linear, and a coarsely quantized base.
pub fn general_shape(set: &ParameterSet) -> CompositeShape {
    CompositeShape::new(vec![
        Component::sigmoid(set.sigmoid_shape, 1.0),
        Component::linear(set.linear_shape, 0.8),
        Component::quantized(QuantizedSigmoidParams::new(set.sigmoid_base, 4), 0.6),
    ])
}

/// The adaptive base shape used as the starting point for tuning.
pub fn adaptive_base(set: &ParameterSet) -> CompositeShape {
    CompositeShape::new(vec![
        Component::sigmoid(set.sigmoid_adaptive, 1.2),
        Component::linear(set.linear_adaptive, 1.0),
    ])
}

/// A steep symmetric sigmoid approximating a circular arc profile.
pub fn basic_circle() -> CompositeShape {
    CompositeShape::new(vec![Component::sigmoid(
        SigmoidParams::new(2, 10.0, 0.0, 1.0),
        1.0,
    )])
}

/// Three line segments forming a triangular profile.
pub fn basic_triangle() -> CompositeShape {
    CompositeShape::new(vec![
        Component::linear(LinearParams::new(1.0, 0.0), 1.0),
        Component::linear(LinearParams::new(-1.0, 1.0), 1.0),
        Component::linear(LinearParams::new(0.0, 0.0), 1.0),
    ])
}

/// All seeded catalog entries in registration order.
pub fn seed_catalog(set: &ParameterSet) -> Vec<(&'static str, CompositeShape)> {
    vec![
        ("general_shape", general_shape(set)),
        ("adaptive_base", adaptive_base(set)),
        ("basic_circle", basic_circle()),
        ("basic_triangle", basic_triangle()),
    ]
}
