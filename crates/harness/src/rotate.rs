//! Best-effort retention for per-run log files
//!
//! Runs once at suite startup, before the run logger opens. Rotation is
//! never allowed to fail the suite: any listing or deletion error is
//! downgraded to a warning and execution continues.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};

/// Per-run logs kept per feature directory after rotation.
pub const DEFAULT_KEEP_RUNS: usize = 10;

/// Deletes all but the `keep` most recently modified per-run logs for
/// `feature`, returning how many files were removed. Summary files never
/// match the per-run pattern and are never touched.
pub fn rotate(feature_dir: &Path, feature: &str, keep: usize) -> usize {
    match try_rotate(feature_dir, feature, keep) {
        Ok(deleted) => deleted,
        Err(e) => {
            warn!(feature, error = %e, "log rotation skipped");
            0
        }
    }
}

fn try_rotate(feature_dir: &Path, feature: &str, keep: usize) -> std::io::Result<usize> {
    if !feature_dir.is_dir() {
        return Ok(0);
    }

    let prefix = format!("{feature}_tests_run_");
    let mut candidates: Vec<(PathBuf, SystemTime)> = Vec::new();

    for entry in fs::read_dir(feature_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(&prefix) || !name.ends_with(".log") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        candidates.push((entry.path(), modified));
    }

    if candidates.len() <= keep {
        return Ok(0);
    }

    // Newest first; everything past `keep` goes.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let mut deleted = 0;
    for (path, _) in candidates.drain(keep..) {
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(file = %path.display(), "rotated out old run log");
                deleted += 1;
            }
            Err(e) => warn!(file = %path.display(), error = %e, "could not delete run log"),
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Writes `count` per-run logs with strictly increasing mtimes,
    /// oldest first. Returns the file names in creation order.
    fn seed_runs(dir: &Path, feature: &str, count: usize) -> Vec<String> {
        let mut names = Vec::new();
        for i in 1..=count {
            let name = format!("{feature}_tests_run_{i:02}.log");
            fs::write(dir.join(&name), format!("run {i}\n")).unwrap();
            names.push(name);
            // Distinct modification times; coarse filesystems round below this.
            sleep(Duration::from_millis(15));
        }
        names
    }

    fn remaining(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn keeps_ten_newest_of_twelve() {
        let root = TempDir::new().unwrap();
        let names = seed_runs(root.path(), "cart", 12);

        let deleted = rotate(root.path(), "cart", 10);

        assert_eq!(deleted, 2);
        let left = remaining(root.path());
        assert_eq!(left.len(), 10);
        // The two oldest are gone, runs 3..=12 survive.
        assert!(!left.contains(&names[0]));
        assert!(!left.contains(&names[1]));
        for name in &names[2..] {
            assert!(left.contains(name), "expected {name} to survive");
        }
    }

    #[test]
    fn at_most_ten_deletes_nothing() {
        let root = TempDir::new().unwrap();
        seed_runs(root.path(), "login", 10);

        assert_eq!(rotate(root.path(), "login", 10), 0);
        assert_eq!(remaining(root.path()).len(), 10);
    }

    #[test]
    fn summary_and_foreign_files_are_ignored() {
        let root = TempDir::new().unwrap();
        seed_runs(root.path(), "cart", 12);
        fs::write(root.path().join("cart_summary.log"), "keep me\n").unwrap();
        fs::write(root.path().join("sorting_tests_run_01.log"), "other feature\n").unwrap();
        fs::write(root.path().join("notes.txt"), "unrelated\n").unwrap();

        rotate(root.path(), "cart", 10);

        let left = remaining(root.path());
        assert!(left.contains(&"cart_summary.log".to_string()));
        assert!(left.contains(&"sorting_tests_run_01.log".to_string()));
        assert!(left.contains(&"notes.txt".to_string()));
    }

    #[test]
    fn missing_directory_is_a_no_op() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("never-created");
        assert_eq!(rotate(&gone, "cart", 10), 0);
    }
}
