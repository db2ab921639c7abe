//! Diagnostic observers for disposal traceability.
//!
//! This module provides hooks for observing release events, enabling
//! structured logging, metrics collection, and leak hunting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{DisposableId, DisposeError};

/// The path a release took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// `dispose()`
    Sync,
    /// `dispose_async()`
    Async,
    /// Drop-time fallback for a disposable that was never released.
    Finalizer,
}

impl fmt::Display for ReleaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseMode::Sync => f.write_str("sync"),
            ReleaseMode::Async => f.write_str("async"),
            ReleaseMode::Finalizer => f.write_str("finalizer"),
        }
    }
}

/// Observer trait for disposal events.
///
/// Observers are attached per disposable with
/// [`Disposable::with_observer`](crate::Disposable::with_observer) and are
/// called synchronously on the releasing thread. Keep implementations
/// lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Disposable, DisposableId, DisposeError, DisposeObserver, ReleaseMode};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct TracingObserver {
///     trace_id: String,
/// }
///
/// impl DisposeObserver for TracingObserver {
///     fn disposing(&self, id: DisposableId, mode: ReleaseMode) {
///         println!("[{}] Disposing {} ({})", self.trace_id, id, mode);
///     }
///
///     fn disposed(&self, id: DisposableId, mode: ReleaseMode, duration: Duration) {
///         println!("[{}] Disposed {} ({}) in {:?}", self.trace_id, id, mode, duration);
///     }
///
///     fn release_failed(&self, id: DisposableId, mode: ReleaseMode, error: &DisposeError) {
///         println!("[{}] Release of {} ({}) failed: {}", self.trace_id, id, mode, error);
///     }
/// }
///
/// let disposable = Disposable::new()
///     .with_observer(Arc::new(TracingObserver { trace_id: "req-42".to_string() }));
/// disposable.dispose().unwrap();
/// ```
pub trait DisposeObserver: Send + Sync {
    /// Called after a release has been claimed, before any hook runs.
    fn disposing(&self, id: DisposableId, mode: ReleaseMode);

    /// Called when every hook of a release returned successfully.
    fn disposed(&self, id: DisposableId, mode: ReleaseMode, duration: Duration);

    /// Called when a hook failed. The disposable is released regardless.
    fn release_failed(&self, id: DisposableId, mode: ReleaseMode, error: &DisposeError);

    /// Called when a disposable was dropped without being released.
    ///
    /// `ran_fallback` tells whether the unmanaged hook was run for it.
    fn leaked(&self, id: DisposableId, ran_fallback: bool) {
        let _ = (id, ran_fallback);
    }
}

/// Container for attached observers.
///
/// Designed to have minimal overhead when no observers are attached.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DisposeObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn DisposeObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn disposing(&self, id: DisposableId, mode: ReleaseMode) {
        for observer in &self.observers {
            observer.disposing(id, mode);
        }
    }

    #[inline]
    pub(crate) fn disposed(&self, id: DisposableId, mode: ReleaseMode, duration: Duration) {
        for observer in &self.observers {
            observer.disposed(id, mode, duration);
        }
    }

    #[inline]
    pub(crate) fn release_failed(&self, id: DisposableId, mode: ReleaseMode, error: &DisposeError) {
        for observer in &self.observers {
            observer.release_failed(id, mode, error);
        }
    }

    #[inline]
    pub(crate) fn leaked(&self, id: DisposableId, ran_fallback: bool) {
        for observer in &self.observers {
            observer.leaked(id, ran_fallback);
        }
    }
}

/// Built-in observer that logs events to stdout.
///
/// Failures and leaks go to stderr. For production use, consider implementing
/// a custom observer that integrates with your logging infrastructure.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Disposable, LoggingObserver};
/// use std::sync::Arc;
///
/// let disposable = Disposable::new().with_observer(Arc::new(LoggingObserver::new()));
/// disposable.dispose().unwrap();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-dispose]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeObserver for LoggingObserver {
    fn disposing(&self, id: DisposableId, mode: ReleaseMode) {
        println!("{} Disposing {} ({})", self.prefix, id, mode);
    }

    fn disposed(&self, id: DisposableId, mode: ReleaseMode, duration: Duration) {
        println!("{} Disposed {} ({}) in {:?}", self.prefix, id, mode, duration);
    }

    fn release_failed(&self, id: DisposableId, mode: ReleaseMode, error: &DisposeError) {
        eprintln!("{} RELEASE FAILED for {} ({}): {}", self.prefix, id, mode, error);
    }

    fn leaked(&self, id: DisposableId, ran_fallback: bool) {
        if ran_fallback {
            eprintln!("{} {} dropped without dispose; unmanaged resources released by fallback", self.prefix, id);
        } else {
            eprintln!("{} {} dropped without dispose", self.prefix, id);
        }
    }
}

/// Observer that tracks release counts and timing.
pub struct MetricsObserver {
    pub disposed_count: AtomicU64,
    pub total_release_time: AtomicU64,
    pub failure_count: AtomicU64,
    pub leak_count: AtomicU64,
}

impl MetricsObserver {
    /// Creates a new metrics observer.
    pub fn new() -> Self {
        Self {
            disposed_count: AtomicU64::new(0),
            total_release_time: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            leak_count: AtomicU64::new(0),
        }
    }

    /// Gets the number of successful releases observed.
    pub fn disposed_count(&self) -> u64 {
        self.disposed_count.load(Ordering::Relaxed)
    }

    /// Gets the number of failed releases observed.
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Gets the number of disposables dropped without being released.
    pub fn leak_count(&self) -> u64 {
        self.leak_count.load(Ordering::Relaxed)
    }

    /// Gets the average time of a successful release.
    pub fn average_release_time(&self) -> Option<Duration> {
        let count = self.disposed_count();
        if count == 0 {
            return None;
        }

        let total_ns = self.total_release_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    /// Resets all metrics.
    pub fn reset(&self) {
        self.disposed_count.store(0, Ordering::Relaxed);
        self.total_release_time.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.leak_count.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeObserver for MetricsObserver {
    fn disposing(&self, _id: DisposableId, _mode: ReleaseMode) {}

    fn disposed(&self, _id: DisposableId, _mode: ReleaseMode, duration: Duration) {
        self.disposed_count.fetch_add(1, Ordering::Relaxed);
        self.total_release_time
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn release_failed(&self, _id: DisposableId, _mode: ReleaseMode, _error: &DisposeError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    fn leaked(&self, _id: DisposableId, _ran_fallback: bool) {
        self.leak_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let observer = MetricsObserver::new();
        let id = DisposableId::next();

        assert_eq!(observer.disposed_count(), 0);
        assert!(observer.average_release_time().is_none());

        observer.disposed(id, ReleaseMode::Sync, Duration::from_millis(10));
        observer.disposed(id, ReleaseMode::Async, Duration::from_millis(20));
        assert_eq!(observer.disposed_count(), 2);
        assert_eq!(observer.average_release_time(), Some(Duration::from_millis(15)));

        observer.release_failed(id, ReleaseMode::Sync, &DisposeError::hook("boom"));
        observer.leaked(id, true);
        assert_eq!(observer.failure_count(), 1);
        assert_eq!(observer.leak_count(), 1);

        observer.reset();
        assert_eq!(observer.disposed_count(), 0);
        assert_eq!(observer.failure_count(), 0);
    }

    #[test]
    fn test_observers_fan_out() {
        let mut observers = Observers::default();
        assert!(!observers.has_observers());

        let metrics = Arc::new(MetricsObserver::new());
        observers.add(metrics.clone());
        observers.add(Arc::new(LoggingObserver::with_prefix("[test]")));
        assert!(observers.has_observers());

        let id = DisposableId::next();
        observers.disposing(id, ReleaseMode::Finalizer);
        observers.disposed(id, ReleaseMode::Finalizer, Duration::from_millis(1));
        assert_eq!(metrics.disposed_count(), 1);
    }
}
