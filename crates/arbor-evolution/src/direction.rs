//! Evolution directions and the health-driven decision.

use serde::{Deserialize, Serialize};

use crate::health::HealthState;

// ── Direction ───────────────────────────────────────────────────────

/// The kinds of bounded mutation the engine can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionDirection {
    OptimizePerformance,
    ExpandCapabilities,
    ImproveAccuracy,
    /// Not selected by the fixed health mapping; reachable through a
    /// direct `execute` call.
    EnhanceAdaptation,
    RevolutionaryBreakthrough,
}

impl std::fmt::Display for EvolutionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OptimizePerformance => write!(f, "optimize-performance"),
            Self::ExpandCapabilities => write!(f, "expand-capabilities"),
            Self::ImproveAccuracy => write!(f, "improve-accuracy"),
            Self::EnhanceAdaptation => write!(f, "enhance-adaptation"),
            Self::RevolutionaryBreakthrough => write!(f, "revolutionary-breakthrough"),
        }
    }
}

// ── Decision ────────────────────────────────────────────────────────

/// Outcome of the evolve-or-not decision for one cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Decision {
    pub health: HealthState,
    pub should_evolve: bool,
    pub direction: Option<EvolutionDirection>,
    pub reasons: Vec<String>,
}

/// Fixed mapping from health state to evolution direction.
///
/// A critical system is never evolved; repair has to come from outside
/// the loop.
pub fn decide(health: HealthState) -> Decision {
    let (should_evolve, direction, reason) = match health {
        HealthState::Critical => (
            false,
            None,
            "system critical; evolution would compound instability",
        ),
        HealthState::NeedsImprovement => (
            true,
            Some(EvolutionDirection::ImproveAccuracy),
            "accuracy below expectations; recalibrating coefficients",
        ),
        HealthState::Good => (
            true,
            Some(EvolutionDirection::OptimizePerformance),
            "healthy baseline; tightening performance",
        ),
        HealthState::Excellent => (
            true,
            Some(EvolutionDirection::ExpandCapabilities),
            "operating excellently; room to expand capabilities",
        ),
        HealthState::ReadyForBreakthrough => (
            true,
            Some(EvolutionDirection::RevolutionaryBreakthrough),
            "all indicators saturated; attempting breakthrough",
        ),
    };

    Decision {
        health,
        should_evolve,
        direction,
        reasons: vec![reason.to_string()],
    }
}
