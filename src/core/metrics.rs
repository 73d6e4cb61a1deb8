//! Delivery counters for observability
//!
//! Counts delivered records and the failure/fallback events reported to
//! the diagnostic channel during delivery.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters tracking pipeline health.
///
/// # Example
///
/// ```
/// use logflow::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_delivered();
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records successfully written to the sink
    delivered: AtomicU64,

    /// Queue-full events resolved by inline synchronous delivery
    queue_full_events: AtomicU64,

    /// Events discarded because the pipeline was stopped
    stopped_drops: AtomicU64,

    /// Hook failures reported during delivery
    hook_failures: AtomicU64,

    /// Formatter failures reported during delivery
    format_failures: AtomicU64,

    /// Sink write failures reported during delivery
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            stopped_drops: AtomicU64::new(0),
            hook_failures: AtomicU64::new(0),
            format_failures: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stopped_drops(&self) -> u64 {
        self.stopped_drops.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn hook_failures(&self) -> u64 {
        self.hook_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn format_failures(&self) -> u64 {
        self.format_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_stopped_drop(&self) -> u64 {
        self.stopped_drops.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_hook_failure(&self) -> u64 {
        self.hook_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_format_failure(&self) -> u64 {
        self.format_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.stopped_drops.store(0, Ordering::Relaxed);
        self.hook_failures.store(0, Ordering::Relaxed);
        self.format_failures.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            stopped_drops: AtomicU64::new(self.stopped_drops()),
            hook_failures: AtomicU64::new(self.hook_failures()),
            format_failures: AtomicU64::new(self.format_failures()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}
