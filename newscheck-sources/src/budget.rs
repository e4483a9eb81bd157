//! Time budgets for upstream calls
//!
//! Every upstream call goes through [`bounded`]: one attempt, a hard deadline,
//! and failures turned into `None` after being logged.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Budget for data APIs (headlines, feeds, fact checks, scoring)
pub const DATA_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget for AI model calls, which may cold-start
pub const AI_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `fut` under `budget` and return the unavailable sentinel (`None`) on any failure.
pub async fn bounded<T, E, F>(upstream: &str, budget: Duration, fut: F) -> Option<T>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(Ok(value)) => {
            debug!(upstream, "Upstream call succeeded");
            Some(value)
        }
        Ok(Err(e)) => {
            warn!(upstream, error = %e, "Upstream unavailable");
            None
        }
        Err(_) => {
            warn!(
                upstream,
                budget_ms = budget.as_millis() as u64,
                "Upstream timed out"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use std::time::Instant;

    #[tokio::test]
    async fn test_success_passes_through() {
        let value = bounded("test", Duration::from_secs(1), async { Ok::<_, SourceError>(7) }).await;
        assert_eq!(value, Some(7));
    }

    #[tokio::test]
    async fn test_error_becomes_sentinel() {
        let value: Option<u32> = bounded("test", Duration::from_secs(1), async {
            Err(SourceError::ParseError("bad".into()))
        })
        .await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_deadline_fires_before_slow_future() {
        let start = Instant::now();
        let result = bounded("slow", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SourceError>(1)
        })
        .await;

        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(1), "took {:?}", start.elapsed());
    }
}
