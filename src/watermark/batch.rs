//! Aggregation of per-file results into a batch summary.

use std::path::PathBuf;

/// Number of failed paths listed in the summary before collapsing the rest
/// into a remainder count.
pub const FAILURE_DISPLAY_CAP: usize = 10;

/// Outcome of a batch run.
///
/// Built incrementally as tasks complete; per-file failures are recorded
/// here and never abort sibling tasks.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, input: PathBuf) {
        self.total += 1;
        self.failures.push(input);
    }

    /// Collect per-task results, preserving the order failures completed in.
    pub fn from_results(results: Vec<(PathBuf, anyhow::Result<()>)>) -> Self {
        let mut summary = Self::new();
        for (input, result) in results {
            match result {
                Ok(()) => summary.record_success(),
                Err(_) => summary.record_failure(input),
            }
        }
        summary
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Failures to display: the first [`FAILURE_DISPLAY_CAP`] paths plus the
    /// count of paths left out.
    pub fn capped_failures(&self) -> (&[PathBuf], usize) {
        let shown = self.failures.len().min(FAILURE_DISPLAY_CAP);
        (&self.failures[..shown], self.failures.len() - shown)
    }
}
