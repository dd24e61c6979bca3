//! Run identity and log file layout

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

/// Identity of one suite execution for one feature.
///
/// Created once per test-process invocation; the random suffix keeps
/// per-run file names distinct across parallel workers started within
/// the same second.
#[derive(Debug, Clone)]
pub struct RunIdentity {
    pub feature: String,
    pub run_id: String,
}

impl RunIdentity {
    pub fn new(feature: &str) -> Self {
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        let run_id = format!("{}_{:04}", Utc::now().format("%Y%m%d_%H%M%S"), suffix);
        Self {
            feature: feature.to_string(),
            run_id,
        }
    }
}

/// The three log tiers for one run.
///
/// `per_run` belongs to this run alone. `feature_summary` and
/// `global_summary` are shared append targets accumulated across runs;
/// rotation never touches them.
#[derive(Debug, Clone)]
pub struct LogFileSet {
    pub per_run: PathBuf,
    pub feature_summary: PathBuf,
    pub global_summary: PathBuf,
    feature_dir: PathBuf,
}

impl LogFileSet {
    pub fn new(log_root: &Path, identity: &RunIdentity) -> Self {
        let feature_dir = log_root.join(&identity.feature);
        Self {
            per_run: feature_dir.join(format!(
                "{}_tests_run_{}.log",
                identity.feature, identity.run_id
            )),
            feature_summary: feature_dir.join(format!("{}_summary.log", identity.feature)),
            global_summary: log_root.join("all_tests_summary.log"),
            feature_dir,
        }
    }

    pub fn feature_dir(&self) -> &Path {
        &self.feature_dir
    }
}
