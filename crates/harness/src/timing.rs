//! Timed-action instrumentation around browser interactions
//!
//! Every meaningful browser interaction in the suite goes through
//! [`timed`]: start and outcome are logged with elapsed milliseconds,
//! slow operations are flagged, and failures are logged in full detail
//! and then returned unchanged. No retries, no suppression.

use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::HarnessError;
use crate::stats::RunStats;
use crate::writer::RunLogger;

/// Elapsed time above which an operation is flagged slow.
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(5000);

/// Runs `op` and logs its lifecycle.
///
/// On success: one SUCCESS line with elapsed ms; if elapsed exceeds
/// `slow_threshold`, exactly one WARNING line and one `slow_ops`
/// increment. On failure: exactly one ERROR detail block (elapsed plus
/// the full error rendering), then the original error is returned
/// unchanged. A log-write failure only surfaces when the operation
/// itself succeeded; an operation failure always wins.
pub async fn timed<F, T, E>(
    logger: &mut RunLogger,
    stats: &mut RunStats,
    name: &str,
    slow_threshold: Duration,
    op: F,
) -> std::result::Result<T, E>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Display + From<HarnessError>,
{
    logger.action(format!("{name} started")).map_err(E::from)?;
    let start = Instant::now();

    match op.await {
        Ok(value) => {
            let elapsed = start.elapsed();
            logger
                .success(format!("{name} completed in {} ms", elapsed.as_millis()))
                .map_err(E::from)?;
            if elapsed > slow_threshold {
                stats.record_slow_op();
                logger
                    .warning(format!(
                        "{name} took {} ms (threshold {} ms)",
                        elapsed.as_millis(),
                        slow_threshold.as_millis()
                    ))
                    .map_err(E::from)?;
            }
            Ok(value)
        }
        Err(err) => {
            let elapsed = start.elapsed();
            // The operation's failure outranks a log-write failure.
            let _ = logger.error(format!(
                "{name} failed after {} ms: {err}",
                elapsed.as_millis()
            ));
            Err(err)
        }
    }
}
