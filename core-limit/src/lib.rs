//! # Shared API Rate Limiting
//!
//! Process-wide call gating for third-party APIs.
//!
//! ## Overview
//!
//! Each remote endpoint family gets one named [`RateLimiter`] enforcing
//! "at most C calls per window of T". The limiter is an explicit object
//! injected into every client that talks to that endpoint, so all concurrent
//! workers serialize their window accounting through the same state. A
//! saturated caller suspends until a slot frees; it never fails.
//!
//! The window is a sliding one: the limiter remembers the start instants of
//! the most recent calls and admits a new call only once fewer than C of them
//! fall inside the trailing period. This holds the bound over ANY window of
//! length T, not just aligned ones.
//!
//! The mutex guards bookkeeping only. Callers acquire a slot, the lock is
//! released, and the actual network call happens entirely outside the
//! limiter, so one slow request never stalls other workers' accounting.
//!
//! ## Usage
//!
//! ```ignore
//! use core_limit::RateLimiter;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let limiter = Arc::new(RateLimiter::new("catalog-search", 20, Duration::from_secs(60)));
//!
//! // In each worker, before the request goes out:
//! limiter.acquire().await;
//! ```

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Sliding-window rate limiter for one named API.
///
/// Safe for concurrent use by any number of workers; the window bound is
/// never exceeded, even transiently.
#[derive(Debug)]
pub struct RateLimiter {
    api_name: String,
    max_calls: usize,
    period: Duration,
    /// Start instants of the calls admitted within the trailing period,
    /// oldest first. Length never exceeds `max_calls`.
    window: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `max_calls` per `period`.
    ///
    /// # Panics
    ///
    /// Panics if `max_calls` is zero or `period` is zero; such a limiter
    /// could never admit a call.
    pub fn new(api_name: impl Into<String>, max_calls: usize, period: Duration) -> Self {
        assert!(max_calls > 0, "rate limiter must admit at least one call");
        assert!(!period.is_zero(), "rate limiter period must be non-zero");
        Self {
            api_name: api_name.into(),
            max_calls,
            period,
            window: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    /// Name of the API this limiter gates, for logging.
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Block until the window admits another call, then claim the slot.
    ///
    /// Suspends the calling task while the window is saturated; never
    /// returns an error and never rejects.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut window = self.window.lock().await;
                let now = Instant::now();

                // Age out calls that left the trailing window.
                while window
                    .front()
                    .is_some_and(|&started| now.duration_since(started) >= self.period)
                {
                    window.pop_front();
                }

                match window.front().copied() {
                    Some(oldest) if window.len() >= self.max_calls => {
                        // Saturated: a slot frees when the oldest call ages out.
                        (oldest + self.period).duration_since(now)
                    }
                    _ => {
                        window.push_back(now);
                        return;
                    }
                }
            };

            debug!(
                api = %self.api_name,
                wait_ms = wait.as_millis() as u64,
                "rate limit window saturated, waiting"
            );
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn admits_burst_up_to_limit_without_waiting() {
        let limiter = RateLimiter::new("test", 3, Duration::from_millis(100));

        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now(), start, "burst within limit must not wait");
    }

    #[tokio::test(start_paused = true)]
    async fn saturated_caller_waits_for_window() {
        let limiter = RateLimiter::new("test", 2, Duration::from_millis(100));

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        // Third call must wait until the first one ages out.
        limiter.acquire().await;
        let elapsed = Instant::now().duration_since(start);
        assert!(
            elapsed >= Duration::from_millis(100),
            "third call admitted after {:?}",
            elapsed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rolling_window_never_exceeded_under_concurrency() {
        const MAX_CALLS: usize = 5;
        const WORKERS: usize = 8;
        const CALLS_PER_WORKER: usize = 5;
        let period = Duration::from_secs(1);

        let limiter = Arc::new(RateLimiter::new("test", MAX_CALLS, period));
        let starts: Arc<std::sync::Mutex<Vec<Instant>>> =
            Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..WORKERS {
            let limiter = Arc::clone(&limiter);
            let starts = Arc::clone(&starts);
            handles.push(tokio::spawn(async move {
                for _ in 0..CALLS_PER_WORKER {
                    limiter.acquire().await;
                    starts.lock().unwrap().push(Instant::now());
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut starts = Arc::try_unwrap(starts).unwrap().into_inner().unwrap();
        starts.sort();
        assert_eq!(starts.len(), WORKERS * CALLS_PER_WORKER);

        // No more than MAX_CALLS may start within any rolling window.
        for (i, &window_start) in starts.iter().enumerate() {
            let in_window = starts[i..]
                .iter()
                .take_while(|&&s| s.duration_since(window_start) < period)
                .count();
            assert!(
                in_window <= MAX_CALLS,
                "{} calls started within one window",
                in_window
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn independent_limiters_do_not_interfere() {
        let search = RateLimiter::new("search", 1, Duration::from_secs(60));
        let listing = RateLimiter::new("listing", 1, Duration::from_secs(60));

        let start = Instant::now();
        search.acquire().await;
        listing.acquire().await;
        assert_eq!(
            Instant::now(),
            start,
            "one limiter's saturation must not delay another"
        );
    }

    #[test]
    #[should_panic(expected = "at least one call")]
    fn zero_call_limit_is_rejected() {
        let _ = RateLimiter::new("test", 0, Duration::from_secs(1));
    }
}
