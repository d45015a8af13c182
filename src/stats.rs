//! Summary statistics for cell-set optimization runs.

use crate::cover::CellSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Before/after cell counts for an optimization run.
///
/// Data-first: callers decide whether to log or render it. The `Display`
/// impl produces a human-readable banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptimizationSummary {
    /// Cell count entering the optimizer.
    pub initial_count: usize,
    /// Cell count after optimization.
    pub optimized_count: usize,
}

impl OptimizationSummary {
    pub fn new(initial: &CellSet, optimized: &CellSet) -> Self {
        Self {
            initial_count: initial.len(),
            optimized_count: optimized.len(),
        }
    }

    pub fn from_counts(initial_count: usize, optimized_count: usize) -> Self {
        Self {
            initial_count,
            optimized_count,
        }
    }

    /// Percentage of cells eliminated by optimization, 0 for empty input.
    /// Negative when the optimized set is larger than the initial one.
    pub fn reduction_percent(&self) -> f64 {
        if self.initial_count == 0 {
            return 0.0;
        }
        (self.initial_count as f64 - self.optimized_count as f64) / self.initial_count as f64
            * 100.0
    }
}

impl fmt::Display for OptimizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "OPTIMIZATION SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total count of initial cells   : {}", self.initial_count)?;
        writeln!(f, "Total count of optimized cells : {}", self.optimized_count)?;
        writeln!(
            f,
            "Percent of optimization        : {:.2} %",
            self.reduction_percent()
        )?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_percent() {
        let summary = OptimizationSummary::from_counts(4, 1);
        assert!((summary.reduction_percent() - 75.0).abs() < 1e-12);

        let empty = OptimizationSummary::from_counts(0, 0);
        assert_eq!(empty.reduction_percent(), 0.0);
    }

    #[test]
    fn test_reduction_percent_when_set_grows() {
        let summary = OptimizationSummary::from_counts(1, 5);
        assert!((summary.reduction_percent() + 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_banner() {
        let summary = OptimizationSummary::from_counts(100, 25);
        let rendered = summary.to_string();
        assert!(rendered.contains("OPTIMIZATION SUMMARY"));
        assert!(rendered.contains("75.00 %"));
    }

    #[test]
    fn test_from_sets() {
        let initial: CellSet = ["9q8yy", "9q8yv", "9q8yz"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let optimized: CellSet = ["9q8y"].iter().map(|s| s.to_string()).collect();
        let summary = OptimizationSummary::new(&initial, &optimized);
        assert_eq!(summary.initial_count, 3);
        assert_eq!(summary.optimized_count, 1);
    }
}
