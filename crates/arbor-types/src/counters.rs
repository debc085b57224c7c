//! Usage counters feeding health analysis.

use serde::{Deserialize, Serialize};

/// Live usage statistics, assembled by the embedding application and
/// passed explicitly into health analysis so the scoring stays pure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Inheritance packages issued so far.
    pub inheritance_count: u64,
    /// Committed parameter mutations so far.
    pub adaptation_count: u64,
    /// Distinct consumer names that have requested inheritance.
    pub distinct_consumer_kinds: u64,
}

impl UsageCounters {
    pub fn new(
        inheritance_count: u64,
        adaptation_count: u64,
        distinct_consumer_kinds: u64,
    ) -> Self {
        Self {
            inheritance_count,
            adaptation_count,
            distinct_consumer_kinds,
        }
    }
}

impl std::fmt::Display for UsageCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Usage(inheritances={}, adaptations={}, consumer_kinds={})",
            self.inheritance_count, self.adaptation_count, self.distinct_consumer_kinds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let counters = UsageCounters::default();
        assert_eq!(counters.inheritance_count, 0);
        assert_eq!(counters.adaptation_count, 0);
        assert_eq!(counters.distinct_consumer_kinds, 0);
    }

    #[test]
    fn display_includes_all_counts() {
        let counters = UsageCounters::new(3, 7, 2);
        let s = counters.to_string();
        assert!(s.contains("inheritances=3"));
        assert!(s.contains("adaptations=7"));
        assert!(s.contains("consumer_kinds=2"));
    }
}
