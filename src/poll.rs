//! Bounded polling utilities
//!
//! Used wherever the tool has to wait for external state it does not own,
//! such as a freshly started container answering HTTP. Every wait is
//! bounded and surfaces [`Error::Timeout`] when the deadline passes.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{Error, Result};

/// Result type for polling check functions.
///
/// - `Ok(Some(value))` - Condition met, return the value
/// - `Ok(None)` - Condition not met yet, keep polling
/// - `Err(e)` - Fatal error, stop polling immediately
pub type PollResult<T> = std::result::Result<Option<T>, Error>;

/// Poll a condition function at regular intervals until it is met, a fatal
/// error occurs, or the timeout is exceeded.
///
/// # Arguments
/// * `timeout` - Maximum time to wait for the condition
/// * `interval` - Time between polls
/// * `description` - Human-readable description for error messages
/// * `check_fn` - Async function that returns `PollResult<T>`
pub async fn wait_with_timeout<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    description: &str,
    mut check_fn: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollResult<T>>,
{
    let start = Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(Error::timeout(description, timeout));
        }

        match check_fn().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                debug!("Waiting for {}...", description);
                tokio::time::sleep(interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_succeeds_immediately() {
        let result = wait_with_timeout(
            Duration::from_secs(1),
            Duration::from_millis(1),
            "immediate",
            || async { Ok(Some(42)) },
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_succeeds_after_polling() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result = wait_with_timeout(
            Duration::from_secs(1),
            Duration::from_millis(1),
            "third try",
            || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Ok(None)
                    } else {
                        Ok(Some("ready"))
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), "ready");
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out() {
        let result: Result<()> = wait_with_timeout(
            Duration::from_millis(10),
            Duration::from_millis(1),
            "never ready",
            || async { Ok(None) },
        )
        .await;

        match result.unwrap_err() {
            Error::Timeout { what, waited } => {
                assert_eq!(what, "never ready");
                assert_eq!(waited, Duration::from_millis(10));
            }
            other => panic!("expected Timeout, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_error_stops_polling() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<()> = wait_with_timeout(
            Duration::from_secs(1),
            Duration::from_millis(1),
            "fatal",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(Error::command_failed("probe", "connection refused"))
                }
            },
        )
        .await;

        assert!(matches!(result, Err(Error::CommandFailed { .. })));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
