use std::collections::BTreeSet;

/// Per-invocation record of what the batch loop did. Built incrementally,
/// discarded after the invocation.
///
/// Invariants: `attempted` is the union of `succeeded` and `failed` (in
/// attempt order), and the two sets are disjoint.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub attempted: Vec<String>,
    pub succeeded: BTreeSet<String>,
    pub failed: BTreeSet<String>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, id: &str) {
        self.attempted.push(id.to_string());
        self.succeeded.insert(id.to_string());
    }

    pub fn record_failure(&mut self, id: &str) {
        self.attempted.push(id.to_string());
        self.failed.insert(id.to_string());
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Failed identifiers in attempt order, for error reporting.
    pub fn failed_in_order(&self) -> Vec<String> {
        self.attempted
            .iter()
            .filter(|id| self.failed.contains(*id))
            .cloned()
            .collect()
    }
}
