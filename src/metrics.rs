// Performance metrics module
//
// Provides lightweight metrics tracking for monitoring game activity

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Global activity metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Metrics are collected throughout the process lifetime and can be logged
/// on session end or shutdown for diagnostics.
#[derive(Debug)]
pub struct Metrics {
    /// Sessions started
    pub games_started: AtomicUsize,

    /// Sessions played to completion
    pub games_completed: AtomicUsize,

    /// Pairs matched across all sessions
    pub pairs_matched: AtomicU64,

    /// Result records accepted by the store
    pub results_submitted: AtomicUsize,

    /// Result submissions that failed (logged, never surfaced)
    pub results_failed: AtomicUsize,

    /// Scheduled callbacks discarded because their session was over
    pub stale_callbacks_discarded: AtomicU64,

    /// Process start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            games_started: AtomicUsize::new(0),
            games_completed: AtomicUsize::new(0),
            pairs_matched: AtomicU64::new(0),
            results_submitted: AtomicUsize::new(0),
            results_failed: AtomicUsize::new(0),
            stale_callbacks_discarded: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a session start
    pub fn record_game_started(&self) {
        self.games_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed session
    pub fn record_game_completed(&self) {
        self.games_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a matched pair
    pub fn record_pair_matched(&self) {
        self.pairs_matched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted result submission
    pub fn record_result_submitted(&self) {
        self.results_submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed result submission
    pub fn record_result_failed(&self) {
        self.results_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a discarded stale callback (flip-back or clock tick whose
    /// session generation had moved on)
    pub fn record_stale_callback(&self) {
        self.stale_callbacks_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Activity Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Games: {} started, {} completed",
            self.games_started.load(Ordering::Relaxed),
            self.games_completed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Pairs matched: {}",
            self.pairs_matched.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Results: {} submitted, {} failed",
            self.results_submitted.load(Ordering::Relaxed),
            self.results_failed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Stale callbacks discarded: {}",
            self.stale_callbacks_discarded.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
