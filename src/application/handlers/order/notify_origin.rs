//! NotifyOriginHandler - Bounded, retried notification of a paid order.

use std::sync::Arc;
use std::time::Duration;

use crate::config::NotifyConfig;
use crate::ports::{NotifyError, OrderNotifier};

/// Retry budget for one notification sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&NotifyConfig> for RetryPolicy {
    fn from(config: &NotifyConfig) -> Self {
        Self::new(config.max_attempts, config.initial_backoff())
    }
}

/// Command to notify the origin site that an order is paid.
#[derive(Debug, Clone)]
pub struct NotifyOriginCommand {
    pub order_no: String,
    pub notify_url: String,
}

/// Result of a notification sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The site acknowledged with code 0.
    Delivered { attempts: u32 },
    /// Every attempt failed; the last failure is kept for logging.
    Exhausted { attempts: u32, last_error: NotifyError },
}

impl NotifyOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotifyOutcome::Delivered { .. })
    }
}

/// Handler that drives the retry loop around an [`OrderNotifier`].
///
/// Sleeps only between attempts, so the default policy waits 1s and then 2s
/// before giving up after the third attempt. Failures are logged and never
/// propagated.
pub struct NotifyOriginHandler {
    notifier: Arc<dyn OrderNotifier>,
    policy: RetryPolicy,
}

impl NotifyOriginHandler {
    pub fn new(notifier: Arc<dyn OrderNotifier>, policy: RetryPolicy) -> Self {
        Self { notifier, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn handle(&self, cmd: NotifyOriginCommand) -> NotifyOutcome {
        let mut attempt = 1;
        loop {
            match self.notifier.notify(&cmd.notify_url).await {
                Ok(()) => {
                    tracing::info!(order_no = %cmd.order_no, attempt, "Origin site notified");
                    return NotifyOutcome::Delivered { attempts: attempt };
                }
                Err(error) if attempt >= self.policy.max_attempts => {
                    tracing::error!(
                        order_no = %cmd.order_no,
                        attempt,
                        error = %error,
                        "Giving up notifying origin site"
                    );
                    return NotifyOutcome::Exhausted {
                        attempts: attempt,
                        last_error: error,
                    };
                }
                Err(error) => {
                    let delay = self.policy.backoff_after(attempt);
                    tracing::warn!(
                        order_no = %cmd.order_no,
                        attempt,
                        error = %error,
                        retry_in_ms = delay.as_millis() as u64,
                        "Origin notification failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct ScriptedNotifier {
        responses: Mutex<VecDeque<Result<(), NotifyError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedNotifier {
        fn new(responses: Vec<Result<(), NotifyError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderNotifier for ScriptedNotifier {
        async fn notify(&self, notify_url: &str) -> Result<(), NotifyError> {
            self.calls.lock().unwrap().push(notify_url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(NotifyError::Status(503)))
        }
    }

    fn command() -> NotifyOriginCommand {
        NotifyOriginCommand {
            order_no: "A1".to_string(),
            notify_url: "https://x/y".to_string(),
        }
    }

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Retry Policy Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn default_policy_is_three_attempts_from_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_after(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_after(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_after(3), Duration::from_secs(4));
    }

    #[test]
    fn policy_requires_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn policy_from_config() {
        let config = NotifyConfig {
            max_attempts: 5,
            initial_backoff_ms: 250,
            timeout_secs: 10,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.initial_backoff, Duration::from_millis(250));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delivers_on_first_success() {
        let notifier = Arc::new(ScriptedNotifier::new(vec![Ok(())]));
        let handler = NotifyOriginHandler::new(notifier.clone(), instant_policy(3));

        let outcome = handler.handle(command()).await;

        assert_eq!(outcome, NotifyOutcome::Delivered { attempts: 1 });
        assert_eq!(notifier.calls(), vec!["https://x/y".to_string()]);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let notifier = Arc::new(ScriptedNotifier::new(vec![
            Err(NotifyError::Status(502)),
            Err(NotifyError::Rejected(1)),
            Ok(()),
        ]));
        let handler = NotifyOriginHandler::new(notifier.clone(), instant_policy(3));

        let outcome = handler.handle(command()).await;

        assert_eq!(outcome, NotifyOutcome::Delivered { attempts: 3 });
        assert_eq!(notifier.calls().len(), 3);
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let notifier = Arc::new(ScriptedNotifier::new(vec![]));
        let handler = NotifyOriginHandler::new(notifier.clone(), instant_policy(3));

        let outcome = handler.handle(command()).await;

        assert_eq!(
            outcome,
            NotifyOutcome::Exhausted {
                attempts: 3,
                last_error: NotifyError::Status(503),
            }
        );
        assert!(!outcome.is_delivered());
        assert_eq!(notifier.calls().len(), 3);
    }

    #[tokio::test]
    async fn single_attempt_policy_never_sleeps() {
        let notifier = Arc::new(ScriptedNotifier::new(vec![Err(NotifyError::Status(500))]));
        let handler = NotifyOriginHandler::new(
            notifier.clone(),
            RetryPolicy::new(1, Duration::from_secs(3600)),
        );

        let outcome = handler.handle(command()).await;

        assert!(matches!(outcome, NotifyOutcome::Exhausted { attempts: 1, .. }));
        assert_eq!(notifier.calls().len(), 1);
    }
}
