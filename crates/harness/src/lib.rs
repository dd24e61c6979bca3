//! File-based logging and statistics harness for the swagshop suite.
//!
//! The suite reports through three append-only log tiers:
//!
//! ```text
//! test-logs/
//!   all_tests_summary.log                      global, shared by all features
//!   <feature>/
//!     <feature>_summary.log                    per-feature, shared by all runs
//!     <feature>_tests_run_<id>.log             per-run, owned by one run
//! ```
//!
//! Per-run files are rotated at suite startup (newest ten kept per
//! feature); the two summary tiers only ever grow. Routing of a line into
//! the summary tiers is decided by its [`LogLevel`] and [`Category`],
//! never by inspecting the message text.

pub mod config;
pub mod entry;
pub mod error;
pub mod rotate;
pub mod run;
pub mod stats;
pub mod timing;
pub mod writer;

pub use config::HarnessConfig;
pub use entry::{Category, LogEvent, LogLevel};
pub use error::{HarnessError, Result};
pub use run::{LogFileSet, RunIdentity};
pub use stats::RunStats;
pub use timing::{timed, DEFAULT_SLOW_THRESHOLD};
pub use writer::RunLogger;
