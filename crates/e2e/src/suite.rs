//! Suite runner: rotation, run logging, execution, teardown
//!
//! Control flow per feature: rotate old per-run logs, open the run
//! logger (which writes the TEST START header), establish the shared
//! session, run each test through the timed-action instrumentation,
//! then flush statistics and write the machine-readable result file.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info};

use swagshop_harness::rotate::rotate;
use swagshop_harness::{
    Category, HarnessConfig, LogEvent, LogFileSet, LogLevel, RunIdentity, RunLogger, RunStats,
};

use crate::driver::{Driver, DriverConfig};
use crate::error::E2eResult;
use crate::fixtures::Fixtures;
use crate::session::Session;

/// Everything a feature test gets to work with.
///
/// The stats value is owned here and passed by explicit borrow; no
/// counter in the suite is process-global.
pub struct TestContext {
    pub driver: Driver,
    pub fixtures: Fixtures,
    pub logger: RunLogger,
    pub stats: RunStats,
    pub slow_threshold: Duration,
}

impl TestContext {
    /// Driver without the shared session, for tests that exercise the
    /// login itself.
    pub fn guest_driver(&self) -> E2eResult<Driver> {
        let mut config = self.driver.config().clone();
        config.storage_state = None;
        Driver::new(config)
    }
}

pub type TestFuture<'a> = Pin<Box<dyn Future<Output = E2eResult<()>> + 'a>>;

/// A named test within a feature.
pub struct TestCase {
    pub name: &'static str,
    pub run: for<'a> fn(&'a mut TestContext) -> TestFuture<'a>,
}

/// Result of one test
#[derive(Debug, Clone, Serialize)]
pub struct TestOutcome {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of one feature run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub feature: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestOutcome>,
    /// The flushed run counters, including the feature-specific extras.
    pub stats: RunStats,
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub harness: HarnessConfig,
    pub driver: DriverConfig,
    pub fixtures: Fixtures,
    /// Result files and per-worker storage state live here
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            harness: HarnessConfig::default(),
            driver: DriverConfig::default(),
            fixtures: Fixtures::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Runs feature test lists against the storefront.
pub struct SuiteRunner {
    config: SuiteConfig,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    pub async fn run_feature(
        &self,
        feature: &str,
        tests: &[TestCase],
    ) -> E2eResult<SuiteResult> {
        let start = Instant::now();

        let identity = RunIdentity::new(feature);
        let files = LogFileSet::new(&self.config.harness.log_root, &identity);
        rotate(files.feature_dir(), feature, self.config.harness.keep_runs);
        let logger = RunLogger::open(identity, files)?;

        let state_dir = self.config.output_dir.join("state").join(feature);
        let session =
            Session::establish(&self.config.driver, &self.config.fixtures, &state_dir).await?;

        let mut ctx = TestContext {
            driver: session.into_driver(),
            fixtures: self.config.fixtures.clone(),
            logger,
            stats: RunStats::new(),
            slow_threshold: self.config.harness.slow_threshold,
        };

        let mut results = Vec::new();
        for case in tests {
            info!("running {feature}::{}", case.name);
            ctx.logger.info(format!("running {}", case.name))?;
            let test_start = Instant::now();

            let outcome = match (case.run)(&mut ctx).await {
                Ok(()) => {
                    ctx.stats.record_pass();
                    ctx.logger.log(
                        LogEvent::new(LogLevel::Success, format!("{} passed", case.name))
                            .with_category(Category::TestPassed),
                    )?;
                    TestOutcome {
                        name: case.name.to_string(),
                        success: true,
                        duration_ms: test_start.elapsed().as_millis() as u64,
                        error: None,
                    }
                }
                Err(e) => {
                    ctx.stats.record_fail();
                    ctx.logger.log(
                        LogEvent::new(LogLevel::Error, format!("{} failed: {e}", case.name))
                            .with_category(Category::TestFailed),
                    )?;
                    error!("{feature}::{} failed: {e}", case.name);
                    TestOutcome {
                        name: case.name.to_string(),
                        success: false,
                        duration_ms: test_start.elapsed().as_millis() as u64,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(outcome);
        }

        ctx.stats.flush(&mut ctx.logger)?;

        let passed = results.iter().filter(|r| r.success).count();
        let result = SuiteResult {
            feature: feature.to_string(),
            total: tests.len(),
            passed,
            failed: tests.len() - passed,
            duration_ms: start.elapsed().as_millis() as u64,
            results,
            stats: ctx.stats,
        };
        self.write_results(&result)?;

        info!(
            "{feature}: {} passed, {} failed ({} ms)",
            result.passed, result.failed, result.duration_ms
        );
        Ok(result)
    }

    /// Writes the per-feature result file the CI artifact step picks up.
    pub fn write_results(&self, result: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let path = self
            .config
            .output_dir
            .join(format!("{}_results.json", result.feature));
        std::fs::write(&path, serde_json::to_string_pretty(result)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_file_shape() {
        let mut stats = RunStats::new();
        stats.record_pass();
        stats.record_fail();
        stats.record_slow_op();
        stats.bump("products_added");

        let result = SuiteResult {
            feature: "cart".to_string(),
            total: 2,
            passed: 1,
            failed: 1,
            duration_ms: 4200,
            results: vec![
                TestOutcome {
                    name: "add product shows badge".to_string(),
                    success: true,
                    duration_ms: 2100,
                    error: None,
                },
                TestOutcome {
                    name: "remove clears badge".to_string(),
                    success: false,
                    duration_ms: 2100,
                    error: Some("badge still visible".to_string()),
                },
            ],
            stats,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["feature"], "cart");
        assert_eq!(json["passed"], 1);
        assert_eq!(json["results"][1]["error"], "badge still visible");
        assert_eq!(json["stats"]["slow_ops"], 1);
        assert_eq!(json["stats"]["extra"]["products_added"], 1);
    }
}
