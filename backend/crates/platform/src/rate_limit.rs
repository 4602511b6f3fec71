//! Rate Limiting Infrastructure
//!
//! In-process sliding-window limiter. State is per instance; a
//! multi-node deployment would need a shared backend behind the same
//! interface.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, Copy)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
}

/// Sliding-window limiter keyed by an opaque source string.
///
/// Each hit is timestamped; hits older than the window are dropped on
/// every check, so a burst unblocks exactly one window after it started.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` and report whether it is allowed.
    pub fn check(&self, key: &str) -> RateLimitResult {
        self.check_at(key, Instant::now())
    }

    /// Clock-injectable variant of [`check`](Self::check).
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitResult {
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());

        // Evict sources whose newest hit has left the window, so the map
        // does not grow for the process lifetime
        hits.retain(|_, timestamps| {
            timestamps
                .last()
                .is_some_and(|&hit| now.duration_since(hit) < self.config.window)
        });

        let entry = hits.entry(key.to_string()).or_default();
        entry.retain(|&hit| now.duration_since(hit) < self.config.window);

        if entry.len() as u32 >= self.config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
            };
        }

        entry.push(now);
        let remaining = self.config.max_requests - entry.len() as u32;
        RateLimitResult {
            allowed: true,
            remaining,
        }
    }

    #[cfg(test)]
    fn tracked_sources(&self) -> usize {
        self.hits.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(3, 900));
        let now = Instant::now();

        assert!(limiter.check_at("1.2.3.4", now).allowed);
        assert!(limiter.check_at("1.2.3.4", now).allowed);
        let third = limiter.check_at("1.2.3.4", now);
        assert!(third.allowed);
        assert_eq!(third.remaining, 0);
        assert!(!limiter.check_at("1.2.3.4", now).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(1, 900));
        let now = Instant::now();

        assert!(limiter.check_at("1.2.3.4", now).allowed);
        assert!(!limiter.check_at("1.2.3.4", now).allowed);
        assert!(limiter.check_at("5.6.7.8", now).allowed);
    }

    #[test]
    fn test_window_slides() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(2, 900));
        let start = Instant::now();

        assert!(limiter.check_at("k", start).allowed);
        assert!(limiter.check_at("k", start).allowed);
        assert!(!limiter.check_at("k", start).allowed);

        // Just inside the window: still blocked
        let almost = start + Duration::from_secs(899);
        assert!(!limiter.check_at("k", almost).allowed);

        // Past the window: hits expired, allowed again
        let later = start + Duration::from_secs(901);
        assert!(limiter.check_at("k", later).allowed);
    }

    #[test]
    fn test_idle_sources_are_evicted() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(5, 900));
        let start = Instant::now();

        limiter.check_at("1.2.3.4", start);
        limiter.check_at("5.6.7.8", start);
        assert_eq!(limiter.tracked_sources(), 2);

        // A later check from a new source sweeps out both idle entries
        let later = start + Duration::from_secs(901);
        limiter.check_at("9.9.9.9", later);
        assert_eq!(limiter.tracked_sources(), 1);
    }
}
