//! Per-client request rate limiting
//!
//! Sliding window over request timestamps. The service talks to the
//! [`RateLimitStore`] trait so a shared backend can replace the in-memory
//! store when several replicas sit behind one load balancer.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

/// Default window of 10 minutes
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(600);

/// Default request budget per window
pub const DEFAULT_MAX_REQUESTS: usize = 20;

/// Outcome of one rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Seconds until the oldest counted request leaves the window
    pub retry_after_secs: Option<u64>,
}

impl RateDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_secs: None,
        }
    }

    pub fn deny(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs: Some(retry_after_secs),
        }
    }
}

/// Backend for per-client request accounting
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count a request from `client` at `now_ms` (Unix millis) if budget remains
    async fn check(&self, client: &str, now_ms: i64) -> RateDecision;

    /// Drop clients with no requests inside the window, returning how many were removed
    async fn purge_expired(&self, now_ms: i64) -> usize;

    /// Number of clients currently tracked
    async fn tracked_clients(&self) -> usize;
}

/// In-process sliding-window store
pub struct InMemoryRateLimitStore {
    requests: DashMap<String, Vec<i64>>,
    max_requests: usize,
    window_ms: i64,
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl InMemoryRateLimitStore {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: DashMap::new(),
            max_requests,
            window_ms: window.as_millis() as i64,
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check(&self, client: &str, now_ms: i64) -> RateDecision {
        let mut timestamps = self.requests.entry(client.to_string()).or_default();
        timestamps.retain(|t| now_ms - t < self.window_ms);

        if timestamps.len() >= self.max_requests {
            // Timestamps are appended in order, so the first is the oldest
            let oldest = timestamps.first().copied().unwrap_or(now_ms);
            let wait_ms = (oldest + self.window_ms - now_ms).max(0);
            let retry_after = (wait_ms as u64).div_ceil(1000);
            debug!(client = %client, retry_after, "Rate limit exceeded");
            return RateDecision::deny(retry_after);
        }

        timestamps.push(now_ms);
        RateDecision::allow()
    }

    async fn purge_expired(&self, now_ms: i64) -> usize {
        // Counted per entry: new clients may be inserted while shards are swept
        let mut removed = 0;
        self.requests.retain(|_, timestamps| {
            timestamps.retain(|t| now_ms - t < self.window_ms);
            let keep = !timestamps.is_empty();
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    async fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_allows_up_to_budget_then_denies() {
        let store = InMemoryRateLimitStore::new(3, Duration::from_secs(600));

        block_on(async {
            for i in 0..3 {
                assert!(store.check("10.0.0.1", 1_000 + i).await.allowed);
            }
            let denied = store.check("10.0.0.1", 5_000).await;
            assert!(!denied.allowed);
            // Oldest at 1000ms leaves the window at 601000ms
            assert_eq!(denied.retry_after_secs, Some(596));
        });
    }

    #[test]
    fn test_clients_are_independent() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(60));

        block_on(async {
            assert!(store.check("a", 0).await.allowed);
            assert!(!store.check("a", 10).await.allowed);
            assert!(store.check("b", 10).await.allowed);
            assert_eq!(store.tracked_clients().await, 2);
        });
    }

    #[test]
    fn test_window_slides() {
        let store = InMemoryRateLimitStore::new(2, Duration::from_secs(10));

        block_on(async {
            assert!(store.check("c", 0).await.allowed);
            assert!(store.check("c", 4_000).await.allowed);
            assert!(!store.check("c", 9_999).await.allowed);
            // First request has aged out
            assert!(store.check("c", 10_000).await.allowed);
            assert!(!store.check("c", 10_001).await.allowed);
        });
    }

    #[test]
    fn test_denied_requests_are_not_counted() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(10));

        block_on(async {
            assert!(store.check("d", 0).await.allowed);
            for t in 1..5 {
                assert!(!store.check("d", t * 1_000).await.allowed);
            }
            assert!(store.check("d", 10_000).await.allowed);
        });
    }

    #[test]
    fn test_purge_drops_idle_clients() {
        let store = InMemoryRateLimitStore::new(5, Duration::from_secs(10));

        block_on(async {
            store.check("old", 0).await;
            store.check("fresh", 9_000).await;

            assert_eq!(store.purge_expired(12_000).await, 1);
            assert_eq!(store.tracked_clients().await, 1);
        });
    }

    #[test]
    fn test_purge_during_concurrent_checks() {
        let store = InMemoryRateLimitStore::new(5, Duration::from_secs(10));
        let clients = 20_000;

        block_on(async {
            for i in 0..1_000 {
                store.check(&format!("idle-{}", i), 0).await;
            }
        });

        let removed = std::thread::scope(|scope| {
            let writer = scope.spawn(|| {
                block_on(async {
                    for i in 0..clients {
                        store.check(&format!("busy-{}", i), 20_000).await;
                    }
                })
            });

            let mut removed = 0;
            while !writer.is_finished() {
                removed += block_on(store.purge_expired(15_000));
            }
            writer.join().unwrap();
            removed + block_on(store.purge_expired(15_000))
        });

        assert_eq!(removed, 1_000);
        block_on(async {
            assert_eq!(store.tracked_clients().await, clients);
            assert_eq!(store.purge_expired(40_000).await, clients);
            assert_eq!(store.tracked_clients().await, 0);
        });
    }
}
