//! Per-run counters flushed to the summary tiers at teardown

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entry::{Category, LogEvent, LogLevel};
use crate::error::Result;
use crate::writer::RunLogger;

/// Counters for one suite execution.
///
/// Owned by the suite context and passed explicitly to whatever needs to
/// increment it; nothing here is process-global. Counters start at zero
/// and the whole value is discarded after [`RunStats::flush`].
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub passed: u64,
    pub failed: u64,
    pub warnings: u64,
    pub slow_ops: u64,
    /// Feature-specific counters, e.g. `products_added` or `sort_checks`.
    pub extra: BTreeMap<String, u64>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self) {
        self.passed += 1;
    }

    pub fn record_fail(&mut self) {
        self.failed += 1;
    }

    pub fn record_warning(&mut self) {
        self.warnings += 1;
    }

    pub fn record_slow_op(&mut self) {
        self.slow_ops += 1;
    }

    pub fn bump(&mut self, counter: &str) {
        *self.extra.entry(counter.to_string()).or_insert(0) += 1;
    }

    /// Writes the final statistics block through the shared log path:
    /// one SUMMARY line per counter, then a fixed key=value tally that
    /// also lands in the global summary.
    pub fn flush(&self, logger: &mut RunLogger) -> Result<()> {
        logger.summary(format!("passed: {}", self.passed))?;
        logger.summary(format!("failed: {}", self.failed))?;
        logger.summary(format!("warnings: {}", self.warnings))?;
        logger.summary(format!("slow operations: {}", self.slow_ops))?;
        for (name, value) in &self.extra {
            logger.summary(format!("{name}: {value}"))?;
        }

        let tally = format!(
            "COMPLETED {}: passed={} failed={} warnings={} slow_ops={}",
            logger.identity().feature,
            self.passed,
            self.failed,
            self.warnings,
            self.slow_ops
        );
        logger.log(LogEvent::new(LogLevel::Summary, tally).with_category(Category::SuiteCompleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{LogFileSet, RunIdentity};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn counters_start_at_zero() {
        let stats = RunStats::new();
        assert_eq!(stats.passed, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.warnings, 0);
        assert_eq!(stats.slow_ops, 0);
        assert!(stats.extra.is_empty());
    }

    #[test]
    fn flush_after_three_passes() {
        let root = TempDir::new().unwrap();
        let identity = RunIdentity::new("cart");
        let files = LogFileSet::new(root.path(), &identity);
        let mut logger = RunLogger::open(identity, files).unwrap();

        let mut stats = RunStats::new();
        for _ in 0..3 {
            stats.record_pass();
        }
        stats.bump("products_added");
        stats.flush(&mut logger).unwrap();

        let feature = fs::read_to_string(&logger.files().feature_summary).unwrap();
        assert!(feature.contains("passed: 3"), "got:\n{feature}");
        assert!(feature.contains("failed: 0"));
        assert!(feature.contains("products_added: 1"));

        let global = fs::read_to_string(&logger.files().global_summary).unwrap();
        assert!(global.contains("COMPLETED cart: passed=3 failed=0 warnings=0 slow_ops=0"));
        // Per-counter SUMMARY lines stay in the feature tier.
        assert!(!global.contains("passed: 3"));
    }
}
