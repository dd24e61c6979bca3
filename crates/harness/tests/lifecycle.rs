//! Full run lifecycle: rotate, open, timed steps, flush.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use thiserror::Error;

use swagshop_harness::{
    rotate::rotate, timed, HarnessError, LogFileSet, RunIdentity, RunLogger, RunStats,
};

#[derive(Error, Debug)]
enum StepError {
    #[error("step failed: {0}")]
    Failed(String),
    #[error("log write failed: {0}")]
    Log(#[from] HarnessError),
}

#[tokio::test]
async fn startup_to_teardown() {
    let root = TempDir::new().unwrap();
    let feature = "checkout";

    // Seed eleven stale run logs so startup rotation has work to do.
    let feature_dir = root.path().join(feature);
    fs::create_dir_all(&feature_dir).unwrap();
    for i in 1..=11 {
        fs::write(
            feature_dir.join(format!("{feature}_tests_run_old{i:02}.log")),
            "stale\n",
        )
        .unwrap();
        std::thread::sleep(Duration::from_millis(15));
    }

    let deleted = rotate(&feature_dir, feature, 10);
    assert_eq!(deleted, 1);

    let identity = RunIdentity::new(feature);
    let files = LogFileSet::new(root.path(), &identity);
    let mut logger = RunLogger::open(identity, files).unwrap();
    let mut stats = RunStats::new();

    // Two passing steps and one failing step, as a feature run would do.
    for name in ["fill customer info", "review order total"] {
        let out: Result<(), StepError> = timed(
            &mut logger,
            &mut stats,
            name,
            Duration::from_secs(5),
            async { Ok(()) },
        )
        .await;
        out.unwrap();
        stats.record_pass();
    }

    let out: Result<(), StepError> = timed(
        &mut logger,
        &mut stats,
        "finish order",
        Duration::from_secs(5),
        async { Err(StepError::Failed("finish button missing".to_string())) },
    )
    .await;
    assert!(out.is_err());
    stats.record_fail();

    stats.flush(&mut logger).unwrap();

    let per_run = fs::read_to_string(&logger.files().per_run).unwrap();
    let feature_summary = fs::read_to_string(&logger.files().feature_summary).unwrap();
    let global = fs::read_to_string(&logger.files().global_summary).unwrap();

    assert!(per_run.contains("TEST START: checkout"));
    assert!(per_run.contains("[SUCCESS] fill customer info completed in"));
    assert!(per_run.contains("[ERROR] finish order failed after"));

    assert!(feature_summary.contains("passed: 2"));
    assert!(feature_summary.contains("failed: 1"));
    assert!(feature_summary.contains("finish button missing"));

    assert!(global.contains("TEST START: checkout"));
    assert!(global.contains("COMPLETED checkout: passed=2 failed=1"));
    assert!(global.contains("finish button missing"));
    // Per-counter lines are feature-tier only.
    assert!(!global.contains("passed: 2"));
}
