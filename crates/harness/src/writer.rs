//! Per-run log writer with summary-tier mirroring

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::entry::{Category, LogEvent, LogLevel};
use crate::error::Result;
use crate::run::{LogFileSet, RunIdentity};

/// Owns the three appenders for one run.
///
/// The per-run file is exclusive to this run; the two summary files are
/// shared across runs and parallel workers. Each line goes out as a
/// single `write_all`, so concurrent workers interleave whole lines at
/// worst. A failed append propagates to the caller.
pub struct RunLogger {
    identity: RunIdentity,
    files: LogFileSet,
    per_run: File,
    feature_summary: File,
    global_summary: File,
}

impl RunLogger {
    /// Creates the log directories on demand, opens the three tiers in
    /// append mode, and writes the run header.
    pub fn open(identity: RunIdentity, files: LogFileSet) -> Result<Self> {
        fs::create_dir_all(files.feature_dir())?;
        if let Some(parent) = files.global_summary.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut logger = Self {
            per_run: open_append(&files.per_run)?,
            feature_summary: open_append(&files.feature_summary)?,
            global_summary: open_append(&files.global_summary)?,
            identity,
            files,
        };
        debug!(
            feature = %logger.identity.feature,
            run_id = %logger.identity.run_id,
            "run log opened",
        );
        logger.write_header()?;
        Ok(logger)
    }

    /// Header line, mirrored to every tier: Summary level reaches the
    /// feature summary, SuiteStart reaches the global summary.
    fn write_header(&mut self) -> Result<()> {
        let header = format!(
            "TEST START: {} run {}",
            self.identity.feature, self.identity.run_id
        );
        self.log(LogEvent::new(LogLevel::Summary, header).with_category(Category::SuiteStart))
    }

    /// Appends the rendered line to the per-run file and mirrors it into
    /// the summary tiers its level/category qualifies it for.
    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let line = event.render();
        append_line(&mut self.per_run, &line)?;
        if event.feature_summary_bound() {
            append_line(&mut self.feature_summary, &line)?;
        }
        if event.global_summary_bound() {
            append_line(&mut self.global_summary, &line)?;
        }
        Ok(())
    }

    pub fn info(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Info, message))
    }

    pub fn action(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Action, message))
    }

    pub fn success(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Success, message))
    }

    pub fn warning(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Warning, message))
    }

    pub fn error(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Error, message))
    }

    pub fn critical(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Critical, message))
    }

    pub fn summary(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::new(LogLevel::Summary, message))
    }

    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    pub fn files(&self) -> &LogFileSet {
        &self.files
    }
}

fn open_append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn append_line(file: &mut File, line: &str) -> Result<()> {
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}
