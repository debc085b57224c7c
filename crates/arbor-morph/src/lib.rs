//! Arbor shape interpolation.
//!
//! Produces a deterministic sequence of composite shapes bridging a
//! source and a target shape over a bounded number of steps. Components
//! are paired by index:
//!
//! - same kind at both ends — every numeric field (and the weight) is
//!   linearly interpolated;
//! - differing kinds — a hard cross-fade: the source component fades out
//!   over the first half of the progress range, the target component
//!   fades in over the second half;
//! - unmatched indices — fade-out for surplus source components, fade-in
//!   for surplus target components.
//!
//! Frame 0 is exactly the source and frame `steps` exactly the target.

#![deny(unsafe_code)]

use arbor_types::{
    Component, ComponentError, ComponentParams, CompositeShape, LinearParams,
    QuantizedSigmoidParams, SigmoidParams,
};
use thiserror::Error;

// ── Errors ──────────────────────────────────────────────────────────

/// Errors from shape interpolation.
#[derive(Debug, Error, PartialEq)]
pub enum MorphError {
    /// At least one interpolation step is required.
    #[error("invalid argument: steps must be at least 1, got {0}")]
    InvalidStepCount(usize),

    /// An endpoint shape contains a malformed component.
    #[error("invalid component: {0}")]
    InvalidComponent(#[from] ComponentError),
}

/// Result type for interpolation.
pub type MorphResult<T> = Result<T, MorphError>;

// ── Interpolation ───────────────────────────────────────────────────

/// Morph `source` into `target` over `steps` steps, returning
/// `steps + 1` frames including both endpoints.
pub fn interpolate(
    source: &CompositeShape,
    target: &CompositeShape,
    steps: usize,
) -> MorphResult<Vec<CompositeShape>> {
    if steps < 1 {
        return Err(MorphError::InvalidStepCount(steps));
    }
    source.validate()?;
    target.validate()?;

    let mut frames = Vec::with_capacity(steps + 1);
    frames.push(source.clone());
    for step in 1..steps {
        let t = step as f64 / steps as f64;
        frames.push(morph_frame(source, target, t));
    }
    frames.push(target.clone());
    Ok(frames)
}

/// A single morph frame at progress `t` in `(0, 1)`.
///
/// Exposed for callers that want one intermediate shape rather than the
/// full sequence; endpoints should use the shapes themselves.
pub fn morph_frame(source: &CompositeShape, target: &CompositeShape, t: f64) -> CompositeShape {
    let count = source.len().max(target.len());
    let mut components = Vec::with_capacity(count);

    for index in 0..count {
        let component = match (
            source.components.get(index),
            target.components.get(index),
        ) {
            (Some(src), Some(tgt)) => {
                if src.kind() == tgt.kind() {
                    lerp_component(src, tgt, t)
                } else {
                    cross_fade(src, tgt, t)
                }
            }
            (Some(src), None) => fade(src, 1.0 - t),
            (None, Some(tgt)) => fade(tgt, t),
            (None, None) => unreachable!("index bounded by max length"),
        };
        components.push(component);
    }

    CompositeShape::new(components)
}

/// Linear interpolation clamped to the endpoint interval, so the value
/// never overshoots either endpoint.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    (a + (b - a) * t).clamp(a.min(b), a.max(b))
}

fn lerp_u32(a: u32, b: u32, t: f64) -> u32 {
    let value = lerp(f64::from(a), f64::from(b), t).round();
    (value.max(1.0)) as u32
}

/// Interpolate two components of the same kind field-for-field.
fn lerp_component(src: &Component, tgt: &Component, t: f64) -> Component {
    let params = match (&src.params, &tgt.params) {
        (ComponentParams::Sigmoid(s), ComponentParams::Sigmoid(g)) => {
            ComponentParams::Sigmoid(lerp_sigmoid(s, g, t))
        }
        (ComponentParams::Linear(s), ComponentParams::Linear(g)) => {
            ComponentParams::Linear(LinearParams::new(
                lerp(s.beta, g.beta, t),
                lerp(s.gamma, g.gamma, t),
            ))
        }
        (ComponentParams::QuantizedSigmoid(s), ComponentParams::QuantizedSigmoid(g)) => {
            ComponentParams::QuantizedSigmoid(QuantizedSigmoidParams::new(
                lerp_sigmoid(&s.sigmoid, &g.sigmoid, t),
                lerp_u32(s.quantum_factor, g.quantum_factor, t),
            ))
        }
        // Callers pair by kind before reaching here.
        _ => src.params,
    };
    Component {
        params,
        weight: lerp(src.weight, tgt.weight, t),
    }
}

fn lerp_sigmoid(s: &SigmoidParams, g: &SigmoidParams, t: f64) -> SigmoidParams {
    SigmoidParams::new(
        lerp_u32(s.n, g.n, t),
        lerp(s.k, g.k, t),
        lerp(s.x0, g.x0, t),
        lerp(s.alpha, g.alpha, t),
    )
}

/// Hard cross-fade between components of differing kinds: the source
/// carries the first half of the progress range, the target the second.
fn cross_fade(src: &Component, tgt: &Component, t: f64) -> Component {
    if t < 0.5 {
        fade(src, 1.0 - 2.0 * t)
    } else {
        fade(tgt, 2.0 * t - 1.0)
    }
}

fn fade(component: &Component, factor: f64) -> Component {
    Component {
        params: component.params,
        weight: component.weight * factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::ComponentKind;
    use proptest::prelude::*;

    fn sigmoid_shape(k: f64, alpha: f64) -> CompositeShape {
        CompositeShape::new(vec![Component::sigmoid(
            SigmoidParams::new(1, k, 0.0, alpha),
            1.0,
        )])
    }

    fn linear_shape(beta: f64) -> CompositeShape {
        CompositeShape::new(vec![Component::linear(LinearParams::new(beta, 0.0), 1.0)])
    }

    #[test]
    fn zero_steps_rejected() {
        let a = sigmoid_shape(1.0, 1.0);
        assert_eq!(
            interpolate(&a, &a, 0),
            Err(MorphError::InvalidStepCount(0))
        );
    }

    #[test]
    fn frame_count_is_steps_plus_one() {
        let frames = interpolate(&sigmoid_shape(1.0, 1.0), &sigmoid_shape(4.0, 2.0), 10).unwrap();
        assert_eq!(frames.len(), 11);
    }

    #[test]
    fn boundaries_equal_endpoints_exactly() {
        let source = sigmoid_shape(1.0, 1.0);
        let target = sigmoid_shape(3.7, 0.9);
        let frames = interpolate(&source, &target, 7).unwrap();
        assert_eq!(frames[0], source);
        assert_eq!(frames[7], target);
    }

    #[test]
    fn boundaries_hold_with_unequal_component_counts() {
        let source = CompositeShape::new(vec![
            Component::sigmoid(SigmoidParams::new(1, 1.0, 0.0, 1.0), 1.0),
            Component::linear(LinearParams::new(2.0, 0.0), 0.5),
        ]);
        let target = sigmoid_shape(2.0, 1.5);
        let frames = interpolate(&source, &target, 4).unwrap();
        assert_eq!(frames[0], source);
        assert_eq!(frames[4], target);
    }

    #[test]
    fn same_kind_fields_interpolate_linearly() {
        let source = sigmoid_shape(1.0, 1.0);
        let target = sigmoid_shape(3.0, 2.0);
        let frames = interpolate(&source, &target, 2).unwrap();
        let ComponentParams::Sigmoid(mid) = frames[1].components[0].params else {
            panic!("expected sigmoid");
        };
        assert!((mid.k - 2.0).abs() < 1e-12);
        assert!((mid.alpha - 1.5).abs() < 1e-12);
    }

    #[test]
    fn same_kind_weight_interpolates_too() {
        let source = CompositeShape::new(vec![Component::linear(LinearParams::new(1.0, 0.0), 0.2)]);
        let target = CompositeShape::new(vec![Component::linear(LinearParams::new(1.0, 0.0), 1.0)]);
        let frames = interpolate(&source, &target, 2).unwrap();
        assert!((frames[1].components[0].weight - 0.6).abs() < 1e-12);
    }

    #[test]
    fn cross_fade_first_half_keeps_source_kind() {
        // t = 0.4: source side of the hard cross-fade, weight scaled by 0.2.
        let source = sigmoid_shape(1.0, 1.0);
        let target = linear_shape(1.0);
        let frames = interpolate(&source, &target, 5).unwrap();
        let comp = &frames[2].components[0];
        assert_eq!(comp.kind(), ComponentKind::Sigmoid);
        assert!((comp.weight - 0.2).abs() < 1e-12);
    }

    #[test]
    fn cross_fade_second_half_switches_to_target_kind() {
        // t = 0.6: target side, weight scaled by 0.2.
        let source = sigmoid_shape(1.0, 1.0);
        let target = linear_shape(1.0);
        let frames = interpolate(&source, &target, 5).unwrap();
        let comp = &frames[3].components[0];
        assert_eq!(comp.kind(), ComponentKind::Linear);
        assert!((comp.weight - 0.2).abs() < 1e-12);
    }

    #[test]
    fn cross_fade_midpoint_emits_zero_weight_target() {
        // steps = 2 puts the single interior frame at t = 0.5, the exact
        // handover point of the cross-fade.
        let frames = interpolate(&sigmoid_shape(1.0, 1.0), &linear_shape(1.0), 2).unwrap();
        assert_eq!(frames.len(), 3);
        let comp = &frames[1].components[0];
        assert_eq!(comp.kind(), ComponentKind::Linear);
        assert!(comp.weight.abs() < 1e-12);
    }

    #[test]
    fn surplus_source_components_fade_out() {
        let source = CompositeShape::new(vec![
            Component::linear(LinearParams::new(1.0, 0.0), 1.0),
            Component::linear(LinearParams::new(2.0, 0.0), 1.0),
        ]);
        let target = CompositeShape::new(vec![Component::linear(LinearParams::new(1.0, 0.0), 1.0)]);
        let frames = interpolate(&source, &target, 4).unwrap();
        // t = 0.75 → surplus component weight 0.25.
        assert!((frames[3].components[1].weight - 0.25).abs() < 1e-12);
    }

    #[test]
    fn surplus_target_components_fade_in() {
        let source = CompositeShape::new(vec![Component::linear(LinearParams::new(1.0, 0.0), 1.0)]);
        let target = CompositeShape::new(vec![
            Component::linear(LinearParams::new(1.0, 0.0), 1.0),
            Component::sigmoid(SigmoidParams::new(1, 1.0, 0.0, 1.0), 0.8),
        ]);
        let frames = interpolate(&source, &target, 4).unwrap();
        // t = 0.25 → incoming component at a quarter of its weight.
        assert!((frames[1].components[1].weight - 0.2).abs() < 1e-12);
    }

    #[test]
    fn malformed_endpoint_rejected() {
        let bad = CompositeShape::new(vec![Component::linear(
            LinearParams::new(f64::NAN, 0.0),
            1.0,
        )]);
        assert!(matches!(
            interpolate(&bad, &linear_shape(1.0), 2),
            Err(MorphError::InvalidComponent(_))
        ));
    }

    proptest! {
        // Same-kind interpolation never overshoots the endpoint interval.
        #[test]
        fn property_lerp_is_monotonic_and_bounded(
            k_src in -5.0f64..5.0,
            k_tgt in -5.0f64..5.0,
            steps in 1usize..20,
        ) {
            let source = sigmoid_shape(k_src, 1.0);
            let target = sigmoid_shape(k_tgt, 1.0);
            let frames = interpolate(&source, &target, steps).unwrap();

            let lo = k_src.min(k_tgt);
            let hi = k_src.max(k_tgt);
            let mut previous = k_src;
            for frame in &frames {
                let ComponentParams::Sigmoid(p) = frame.components[0].params else {
                    panic!("expected sigmoid");
                };
                prop_assert!(p.k >= lo && p.k <= hi);
                // Monotone toward the target.
                if k_tgt >= k_src {
                    prop_assert!(p.k >= previous);
                } else {
                    prop_assert!(p.k <= previous);
                }
                previous = p.k;
            }
        }

        // Boundary frames always equal the endpoints exactly.
        #[test]
        fn property_boundary_frames_exact(steps in 1usize..30) {
            let source = sigmoid_shape(0.3, 1.1);
            let target = linear_shape(2.2);
            let frames = interpolate(&source, &target, steps).unwrap();
            prop_assert_eq!(frames.first().unwrap(), &source);
            prop_assert_eq!(frames.last().unwrap(), &target);
        }
    }
}
