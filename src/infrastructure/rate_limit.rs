//! Fixed-window rate limiting keyed by client identity
//!
//! Kept outside the membership core: handlers decide which policy applies
//! to which endpoint. Windows are process-local; expired windows are
//! dropped lazily on access.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use tokio::sync::RwLock;

/// Policy for one limiter instance
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    /// Window length
    pub window: Duration,
    /// Maximum requests per window
    pub max_requests: u32,
}

impl RateLimitPolicy {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
        }
    }

    /// 5 attempts per 15 minutes - for login/signup endpoints
    pub fn auth() -> Self {
        Self::new(Duration::from_secs(15 * 60), 5)
    }

    /// 100 requests per minute - general API traffic
    pub fn api() -> Self {
        Self::new(Duration::from_secs(60), 100)
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitVerdict {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Seconds until the window resets
    pub reset_in_seconds: u64,
}

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by client identity
#[derive(Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: RwLock<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Check and count a request for the given identity
    pub async fn check(&self, identity: &str) -> RateLimitVerdict {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        windows.retain(|_, w| w.reset_at > now);

        match windows.get_mut(identity) {
            None => {
                windows.insert(
                    identity.to_string(),
                    Window {
                        count: 1,
                        reset_at: now + self.policy.window,
                    },
                );

                RateLimitVerdict {
                    allowed: true,
                    remaining: self.policy.max_requests.saturating_sub(1),
                    reset_in_seconds: self.policy.window.as_secs(),
                }
            }
            Some(window) => {
                let reset_in_seconds = window.reset_at.saturating_duration_since(now).as_secs();

                if window.count >= self.policy.max_requests {
                    return RateLimitVerdict {
                        allowed: false,
                        remaining: 0,
                        reset_in_seconds,
                    };
                }

                window.count += 1;

                RateLimitVerdict {
                    allowed: true,
                    remaining: self.policy.max_requests - window.count,
                    reset_in_seconds,
                }
            }
        }
    }

    /// Forget the current window for an identity
    pub async fn reset(&self, identity: &str) {
        let mut windows = self.windows.write().await;
        windows.remove(identity);
    }
}

/// Best-effort client identity from proxy headers
pub fn client_identifier(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max: u32) -> RateLimitPolicy {
        RateLimitPolicy::new(Duration::from_secs(60), max)
    }

    #[tokio::test]
    async fn test_first_request_allowed() {
        let limiter = RateLimiter::new(policy(5));

        let verdict = limiter.check("10.0.0.1").await;

        assert!(verdict.allowed);
        assert_eq!(verdict.remaining, 4);
    }

    #[tokio::test]
    async fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(policy(2));

        limiter.check("10.0.0.1").await;
        limiter.check("10.0.0.1").await;
        let verdict = limiter.check("10.0.0.1").await;

        assert!(!verdict.allowed);
        assert_eq!(verdict.remaining, 0);
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let limiter = RateLimiter::new(policy(1));

        limiter.check("10.0.0.1").await;

        assert!(!limiter.check("10.0.0.1").await.allowed);
        assert!(limiter.check("10.0.0.2").await.allowed);
    }

    #[tokio::test]
    async fn test_reset_clears_window() {
        let limiter = RateLimiter::new(policy(1));

        limiter.check("10.0.0.1").await;
        assert!(!limiter.check("10.0.0.1").await.allowed);

        limiter.reset("10.0.0.1").await;
        assert!(limiter.check("10.0.0.1").await.allowed);
    }

    #[tokio::test]
    async fn test_window_expires() {
        let limiter = RateLimiter::new(RateLimitPolicy::new(Duration::from_millis(20), 1));

        limiter.check("10.0.0.1").await;
        assert!(!limiter.check("10.0.0.1").await.allowed);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.check("10.0.0.1").await.allowed);
    }

    #[test]
    fn test_client_identifier_from_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.5, 10.0.0.1".parse().unwrap());

        assert_eq!(client_identifier(&headers), "203.0.113.5");
    }

    #[test]
    fn test_client_identifier_from_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "203.0.113.9".parse().unwrap());

        assert_eq!(client_identifier(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_identifier_fallback() {
        let headers = HeaderMap::new();
        assert_eq!(client_identifier(&headers), "unknown");
    }
}
