//! Retry policies for store requests.
//!
//! The tracker's contract is "one attempt, then degrade", so every endpoint
//! defaults to [`RetryPolicy::None`]. Callers may opt in per endpoint through
//! the client builder.

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry transport failures and 429/502/503/504 with capped backoff.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Resolved config, or `None` for a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::default()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.backoff_factor.powi(attempt.min(31) as i32);
        let capped = (self.initial_delay.as_millis() as f64 * exp)
            .min(self.max_delay.as_millis() as f64);

        let millis = if self.jitter {
            let spread = capped * 0.25;
            (capped + rand::random::<f64>().mul_add(2.0 * spread, -spread)).max(0.0)
        } else {
            capped
        };
        Duration::from_millis(millis as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryConfig {
        RetryConfig {
            jitter: false,
            ..RetryConfig::default()
        }
    }

    #[test]
    fn test_default_policy_is_single_attempt() {
        assert!(RetryPolicy::default().config().is_none());
        assert!(RetryPolicy::Idempotent.config().is_some());
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        let config = RetryConfig {
            max_delay: Duration::from_millis(900),
            ..no_jitter()
        };
        assert_eq!(config.delay_for_attempt(0).as_millis(), 250);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 500);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 900);
        assert_eq!(config.delay_for_attempt(40).as_millis(), 900);
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let ms = config.delay_for_attempt(1).as_millis();
            assert!((375..=625).contains(&ms), "{ms}");
        }
    }

    #[test]
    fn test_retryable_statuses() {
        let config = RetryConfig::default();
        assert!(config.is_retryable_status(503));
        assert!(!config.is_retryable_status(500));
        assert!(!config.is_retryable_status(404));
    }
}
