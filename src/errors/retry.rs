use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::ReportError;
use tracing::warn;

const MAX_DELAY_SECS: f64 = 30.0;

impl ErrorClassification {
    /// Calculate the retry delay for the given attempt number (0-indexed):
    /// exponential backoff 2^attempt plus random jitter (0-1s), capped at 30s.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base: f64 = 2.0_f64.powi(attempt as i32);
        let jitter: f64 = rand::random::<f64>();
        Duration::from_secs_f64((base + jitter).min(MAX_DELAY_SECS))
    }
}

/// Retry configuration for backend operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, ReportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ReportError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0;

    loop {
        let e = match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = e.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(e);
        }
        if attempt + 1 >= max_attempts {
            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                max = max_attempts,
                "Max retries exhausted"
            );
            return Err(e);
        }

        let delay = classification.retry_delay(attempt);
        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            max = max_attempts,
            error_type = classification.error_type,
            delay_secs = delay.as_secs(),
            error = %e,
            "Retrying after error"
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_delay_exponential() {
        let class = ErrorClassification { error_type: "ConnectionError", retryable: true };
        let d0 = class.retry_delay(0);
        let d1 = class.retry_delay(1);
        // Attempt 0: 2^0 + jitter = ~1-2s
        assert!(d0.as_secs_f64() >= 1.0 && d0.as_secs_f64() < 3.0);
        // Attempt 1: 2^1 + jitter = ~2-3s
        assert!(d1.as_secs_f64() >= 2.0 && d1.as_secs_f64() < 4.0);
    }

    #[test]
    fn test_retry_delay_capped() {
        let class = ErrorClassification { error_type: "TimeoutError", retryable: true };
        assert_eq!(class.retry_delay(10), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let config = RetryConfig { max_retries: 3 };
        let result = with_retry("test", &config, || async {
            Ok::<_, ReportError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 3 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ReportError::Authentication("bad credentials".into()))
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_zero_retries_single_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 0 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ReportError::Connection("refused".into()))
            }
        }).await;

        assert!(matches!(result, Err(ReportError::Connection(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_recovers_after_transient_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 2 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ReportError::Timeout("slow".into()))
                } else {
                    Ok("connected")
                }
            }
        }).await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
