//! Sweep Report Module
//!
//! Tallies what a maintenance pass saw and did.

use serde::Serialize;

// == Sweep Report ==
/// Outcome of one sweep over a key prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Keys examined under the prefix
    pub scanned: usize,
    /// Entries classified as expired
    pub expired: usize,
    /// Entries whose value could not be parsed
    pub corrupt: usize,
    /// Entries actually deleted from the store
    pub removed: usize,
    /// Keys skipped because a read or delete failed
    pub failed: usize,
}

impl SweepReport {
    // == Constructor ==
    /// Creates a report with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries marked for deletion, expired or corrupt.
    pub fn marked(&self) -> usize {
        self.expired + self.corrupt
    }

    pub fn record_scanned(&mut self) {
        self.scanned += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn record_corrupt(&mut self) {
        self.corrupt += 1;
    }

    pub fn record_removed(&mut self, count: usize) {
        self.removed += count;
    }

    pub fn record_failed(&mut self, count: usize) {
        self.failed += count;
    }

    // == Merge ==
    /// Adds another report's counters into this one.
    pub fn merge(&mut self, other: &SweepReport) {
        self.scanned += other.scanned;
        self.expired += other.expired;
        self.corrupt += other.corrupt;
        self.removed += other.removed;
        self.failed += other.failed;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_new() {
        let report = SweepReport::new();
        assert_eq!(report.scanned, 0);
        assert_eq!(report.removed, 0);
        assert_eq!(report.marked(), 0);
    }

    #[test]
    fn test_marked_counts_expired_and_corrupt() {
        let mut report = SweepReport::new();
        report.record_expired();
        report.record_expired();
        report.record_corrupt();
        assert_eq!(report.marked(), 3);
    }

    #[test]
    fn test_merge() {
        let mut a = SweepReport::new();
        a.record_scanned();
        a.record_removed(1);

        let mut b = SweepReport::new();
        b.record_scanned();
        b.record_scanned();
        b.record_failed(1);

        a.merge(&b);
        assert_eq!(a.scanned, 3);
        assert_eq!(a.removed, 1);
        assert_eq!(a.failed, 1);
    }
}
