//! Pre-evolution safety checks.

use arbor_types::UsageCounters;
use serde::{Deserialize, Serialize};

use crate::direction::EvolutionDirection;

/// Outcome of the safety checks run before an evolution step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SafetyReport {
    pub passed: bool,
    pub warnings: Vec<String>,
    pub critical_issues: Vec<String>,
    pub checks_performed: Vec<String>,
}

/// Run the safety checks for a proposed direction.
///
/// A store that has never issued an inheritance package is treated as
/// unstable and blocks evolution outright. A breakthrough attempted below
/// the confidence bar is flagged but not blocked.
pub fn safety_check(
    direction: EvolutionDirection,
    counters: &UsageCounters,
    performance_score: f64,
) -> SafetyReport {
    let mut report = SafetyReport {
        passed: true,
        warnings: Vec::new(),
        critical_issues: Vec::new(),
        checks_performed: Vec::new(),
    };

    report.checks_performed.push("store stability".to_string());
    if counters.inheritance_count == 0 {
        report
            .critical_issues
            .push("no inheritance packages issued; store considered unstable".to_string());
        report.passed = false;
    }

    report
        .checks_performed
        .push("breakthrough confidence".to_string());
    if direction == EvolutionDirection::RevolutionaryBreakthrough && performance_score < 0.9 {
        report.warnings.push(format!(
            "performance {performance_score:.3} below breakthrough confidence bar"
        ));
    }

    report
}
