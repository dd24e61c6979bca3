//! Harness configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::rotate::DEFAULT_KEEP_RUNS;
use crate::timing::DEFAULT_SLOW_THRESHOLD;

/// Configuration for the logging harness
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root of the log tree (`test-logs` by default)
    pub log_root: PathBuf,

    /// Per-run log files kept per feature after rotation
    pub keep_runs: usize,

    /// Elapsed time above which a timed action is flagged slow
    pub slow_threshold: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from("test-logs"),
            keep_runs: DEFAULT_KEEP_RUNS,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }
}

impl HarnessConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("SWAGSHOP_LOG_DIR") {
            if !dir.is_empty() {
                config.log_root = PathBuf::from(dir);
            }
        }
        config
    }
}
