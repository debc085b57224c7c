//! Inheritance packages and parameter derivation.

use arbor_types::{PackageId, ParameterSet};
use serde::{Deserialize, Serialize};

use crate::profile::{Profile, ScalingFactors};

// ── Derivation ──────────────────────────────────────────────────────

/// Derive a scaled parameter set from the canonical one.
///
/// Gain-like fields scale with their axis factor (`k`/`alpha` for the
/// sigmoid groups, `beta`/`gamma` for the linear groups, the whole ladder
/// for the quantum axis). Structural fields — exponent `n`, center `x0`,
/// and the control coefficients — are inherited unscaled.
///
/// Deterministic: identical inputs always produce the identical set.
pub fn derive_parameters(base: &ParameterSet, factors: &ScalingFactors) -> ParameterSet {
    let mut derived = base.clone();

    for group in derived.sigmoid_groups_mut() {
        group.k *= factors.sigmoid;
        group.alpha *= factors.sigmoid;
    }
    for group in derived.linear_groups_mut() {
        group.beta *= factors.linear;
        group.gamma *= factors.linear;
    }
    derived.quantum_factors = scale_quantum_ladder(&base.quantum_factors, factors.quantum);

    derived
}

/// Scale the quantization ladder, keeping it positive and strictly
/// increasing after rounding.
fn scale_quantum_ladder(ladder: &[u32], scale: f64) -> Vec<u32> {
    let mut scaled = Vec::with_capacity(ladder.len());
    for &factor in ladder {
        let value = (f64::from(factor) * scale).round().max(1.0) as u32;
        let floor = scaled.last().map_or(1, |&prev: &u32| prev + 1);
        scaled.push(value.max(floor));
    }
    scaled
}

// ── Inheritance Package ─────────────────────────────────────────────

/// An immutable, scaled snapshot of the canonical parameters issued to
/// one named consumer. Never mutated after creation; consumers may hold
/// a package indefinitely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InheritancePackage {
    pub package_id: PackageId,
    pub consumer_name: String,
    pub profile: Profile,
    /// The effective factors after custom overrides.
    pub scaling: ScalingFactors,
    pub derived_parameters: ParameterSet,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Display for InheritancePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Package({}, consumer={}, profile={})",
            self.package_id, self.consumer_name, self.profile,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_derivation_is_identity() {
        let base = ParameterSet::default();
        let derived = derive_parameters(&base, &Profile::Balanced.factors());
        assert_eq!(derived, base);
    }

    #[test]
    fn sigmoid_axis_scales_gain_fields_only() {
        let base = ParameterSet::default();
        let derived = derive_parameters(&base, &Profile::SigmoidWeighted.factors());
        assert!((derived.sigmoid_base.k - 1.5).abs() < 1e-12);
        assert!((derived.sigmoid_base.alpha - 1.5).abs() < 1e-12);
        // Structural fields untouched.
        assert_eq!(derived.sigmoid_base.n, base.sigmoid_base.n);
        assert_eq!(derived.sigmoid_base.x0, base.sigmoid_base.x0);
        assert_eq!(derived.control, base.control);
    }

    #[test]
    fn linear_axis_scales_both_linear_fields() {
        let mut base = ParameterSet::default();
        base.linear_base.gamma = 0.5;
        let derived = derive_parameters(&base, &Profile::LinearWeighted.factors());
        assert!((derived.linear_base.beta - 1.5).abs() < 1e-12);
        assert!((derived.linear_base.gamma - 0.75).abs() < 1e-12);
    }

    #[test]
    fn derived_set_stays_valid_for_all_profiles() {
        let base = ParameterSet::default();
        for profile in Profile::all() {
            let derived = derive_parameters(&base, &profile.factors());
            derived
                .validate()
                .unwrap_or_else(|e| panic!("{profile} produced invalid set: {e}"));
        }
    }

    #[test]
    fn quantum_ladder_stays_strictly_increasing_when_shrunk() {
        // 0.6 collapses 1 and 2 onto each other before renormalization.
        let scaled = scale_quantum_ladder(&[1, 2, 4, 8], 0.6);
        assert!(scaled.windows(2).all(|w| w[0] < w[1]));
        assert!(scaled.iter().all(|&f| f >= 1));
    }

    #[test]
    fn quantum_ladder_scales_up() {
        let scaled = scale_quantum_ladder(&[1, 2, 4], 1.5);
        assert_eq!(scaled, vec![2, 3, 6]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let base = ParameterSet::default();
        let factors = Profile::QuantumWeighted.factors();
        assert_eq!(
            derive_parameters(&base, &factors),
            derive_parameters(&base, &factors)
        );
    }
}
