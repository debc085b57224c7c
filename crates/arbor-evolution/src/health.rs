//! Discrete system-health states.

use serde::{Deserialize, Serialize};

/// Health state derived from the weighted score via five non-overlapping
/// bands. There is no terminal state; the engine is designed to run
/// indefinitely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    Critical,
    NeedsImprovement,
    Good,
    Excellent,
    ReadyForBreakthrough,
}

impl HealthState {
    /// Map a weighted score onto its health band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::ReadyForBreakthrough
        } else if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::NeedsImprovement
        } else {
            Self::Critical
        }
    }

    /// Whether this state permits any evolution at all.
    pub fn allows_evolution(&self) -> bool {
        !matches!(self, Self::Critical)
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::NeedsImprovement => write!(f, "needs-improvement"),
            Self::Good => write!(f, "good"),
            Self::Excellent => write!(f, "excellent"),
            Self::ReadyForBreakthrough => write!(f, "ready-for-breakthrough"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_interiors() {
        assert_eq!(HealthState::from_score(0.95), HealthState::ReadyForBreakthrough);
        assert_eq!(HealthState::from_score(0.85), HealthState::Excellent);
        assert_eq!(HealthState::from_score(0.7), HealthState::Good);
        assert_eq!(HealthState::from_score(0.5), HealthState::NeedsImprovement);
        assert_eq!(HealthState::from_score(0.3), HealthState::Critical);
    }

    #[test]
    fn band_edges_are_inclusive_upward() {
        assert_eq!(HealthState::from_score(0.9), HealthState::ReadyForBreakthrough);
        assert_eq!(HealthState::from_score(0.8), HealthState::Excellent);
        assert_eq!(HealthState::from_score(0.6), HealthState::Good);
        assert_eq!(HealthState::from_score(0.4), HealthState::NeedsImprovement);
    }

    #[test]
    fn just_below_edges_fall_through() {
        assert_eq!(HealthState::from_score(0.8999), HealthState::Excellent);
        assert_eq!(HealthState::from_score(0.7999), HealthState::Good);
        assert_eq!(HealthState::from_score(0.5999), HealthState::NeedsImprovement);
        assert_eq!(HealthState::from_score(0.3999), HealthState::Critical);
    }

    #[test]
    fn only_critical_blocks_evolution() {
        assert!(!HealthState::Critical.allows_evolution());
        assert!(HealthState::NeedsImprovement.allows_evolution());
        assert!(HealthState::ReadyForBreakthrough.allows_evolution());
    }

    #[test]
    fn display_names() {
        assert_eq!(HealthState::Critical.to_string(), "critical");
        assert_eq!(
            HealthState::ReadyForBreakthrough.to_string(),
            "ready-for-breakthrough"
        );
    }
}
