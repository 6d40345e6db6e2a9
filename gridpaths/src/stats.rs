use std::ops::AddAssign;
use std::time::Duration;

/// Number of completed paths between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Search statistic collector.
/// It collects data during the path enumeration and receives progress events.
pub trait SearchStatsCollector {
    /// Called for each empty cell expanded by the search, can return false to cancel the enumeration.
    #[inline(always)] fn expanded(&mut self) -> bool { true }

    /// Called for each branch rejected by the connectivity check.
    #[inline(always)] fn pruned(&mut self) { }

    /// Called each time the number of completed paths reaches a multiple of [`PROGRESS_INTERVAL`].
    #[inline(always)] fn progress(&mut self, _paths: u64, _elapsed: Duration) { }
}

/// Search statistic collector that ignores all events.
impl SearchStatsCollector for () {}

impl SearchStatsCollector for u64 {
    #[inline(always)] fn expanded(&mut self) -> bool { *self += 1; true }
}

#[derive(Default, Copy, Clone)]
pub struct SearchAllStats {
    pub expanded: u64,
    pub pruned: u64,
}

impl SearchAllStats {
    pub fn visits(&self) -> u64 { self.expanded + self.pruned }
}

impl AddAssign for SearchAllStats {
    fn add_assign(&mut self, rhs: Self) {
        self.expanded += rhs.expanded;
        self.pruned += rhs.pruned;
    }
}

impl SearchStatsCollector for SearchAllStats {
    #[inline(always)] fn expanded(&mut self) -> bool { self.expanded += 1; true }
    #[inline(always)] fn pruned(&mut self) { self.pruned += 1; }
}

/// Cancels the enumeration once the number of expanded cells reaches `limit`.
pub struct Limited {
    pub expanded: u64,
    pub limit: u64,
}

impl Limited {
    pub fn with_limit(limit: u64) -> Self { Self { expanded: 0, limit } }

    pub fn reset_limit(&mut self, limit: u64) { self.expanded = 0; self.limit = limit; }
}

impl SearchStatsCollector for Limited {
    #[inline(always)] fn expanded(&mut self) -> bool {
        if self.expanded >= self.limit { return false; }
        self.expanded += 1;
        true
    }
}
