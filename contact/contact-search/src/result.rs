//! Result of a contact search sweep.

use std::time::Duration;

use liner_types::ContactRecord;

/// Contacts found by a sweep, one per increment.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Contact records in increment order.
    pub records: Vec<ContactRecord>,

    /// Walk passes over all increments.
    pub passes: usize,

    /// Escape moves taken.
    pub escapes: usize,

    /// Escapes that had to jump to the globally nearest point.
    pub fallbacks: usize,

    /// Wall-clock time of the sweep.
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Number of records flagged low-confidence.
    #[must_use]
    pub fn low_confidence_count(&self) -> usize {
        self.records.iter().filter(|r| r.low_confidence).count()
    }

    /// True when no record needed a fallback.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.low_confidence_count() == 0
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Contact search: {} increments, {} passes, {} escapes ({} fallbacks) in {:.3}s",
            self.records.len(),
            self.passes,
            self.escapes,
            self.fallbacks,
            self.elapsed.as_secs_f64()
        )
    }
}
