//! Log entry types and line formatting

use std::fmt;

use chrono::{SecondsFormat, Utc};

/// Severity of a harness log line.
///
/// Distinct from tracing levels: these are the levels written into the
/// suite's own log files and consumed as plain text by the CI artifact
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Action,
    Success,
    Warning,
    Error,
    Critical,
    Summary,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Action => "ACTION",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Summary => "SUMMARY",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing tag attached to every log call.
///
/// Summary-tier placement is decided by this tag together with the
/// level; the message text itself carries no routing meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    General,
    SuiteStart,
    TestPassed,
    TestFailed,
    SuiteCompleted,
}

/// A single line bound for the log files. Appended, never mutated.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub category: Category,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            category: Category::General,
            message: message.into(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Renders the line as `[ISO-8601 timestamp] [LEVEL] message`.
    pub fn render(&self) -> String {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        format!("[{}] [{}] {}", stamp, self.level, self.message)
    }

    /// Whether this line is mirrored into the per-feature summary.
    pub fn feature_summary_bound(&self) -> bool {
        matches!(self.level, LogLevel::Error | LogLevel::Summary)
            || matches!(self.category, Category::TestPassed | Category::TestFailed)
    }

    /// Whether this line is mirrored into the global summary.
    pub fn global_summary_bound(&self) -> bool {
        matches!(self.level, LogLevel::Error | LogLevel::Critical)
            || matches!(self.category, Category::SuiteStart | Category::SuiteCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_level_token() {
        let line = LogEvent::new(LogLevel::Action, "clicking login").render();
        assert!(line.contains("[ACTION] clicking login"), "got: {line}");
        assert!(line.starts_with('['));
    }

    #[test]
    fn routing_by_level() {
        let err = LogEvent::new(LogLevel::Error, "boom");
        assert!(err.feature_summary_bound());
        assert!(err.global_summary_bound());

        let crit = LogEvent::new(LogLevel::Critical, "very boom");
        assert!(!crit.feature_summary_bound());
        assert!(crit.global_summary_bound());

        let info = LogEvent::new(LogLevel::Info, "hello");
        assert!(!info.feature_summary_bound());
        assert!(!info.global_summary_bound());
    }

    #[test]
    fn routing_by_category() {
        let passed =
            LogEvent::new(LogLevel::Success, "cart test passed").with_category(Category::TestPassed);
        assert!(passed.feature_summary_bound());
        assert!(!passed.global_summary_bound());

        let start =
            LogEvent::new(LogLevel::Info, "TEST START: cart").with_category(Category::SuiteStart);
        assert!(!start.feature_summary_bound());
        assert!(start.global_summary_bound());
    }
}
