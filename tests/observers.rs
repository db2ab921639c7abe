use ferrous_dispose::{
    Disposable, DisposableCollection, DisposableId, DisposeError, DisposeObserver,
    DisposeOptions, DisposeResult, LoggingObserver, MetricsObserver, ReleaseHooks, ReleaseMode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DisposeObserver for RecordingObserver {
    fn disposing(&self, _id: DisposableId, mode: ReleaseMode) {
        self.events.lock().unwrap().push(format!("disposing:{}", mode));
    }

    fn disposed(&self, _id: DisposableId, mode: ReleaseMode, _duration: Duration) {
        self.events.lock().unwrap().push(format!("disposed:{}", mode));
    }

    fn release_failed(&self, _id: DisposableId, mode: ReleaseMode, error: &DisposeError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("failed:{}:{}", mode, error));
    }

    fn leaked(&self, _id: DisposableId, ran_fallback: bool) {
        self.events.lock().unwrap().push(format!("leaked:{}", ran_fallback));
    }
}

struct Failing;

impl ReleaseHooks for Failing {
    fn release_managed(&self) -> DisposeResult<()> {
        Err(DisposeError::hook("disk full"))
    }
}

#[test]
fn test_observer_sees_sync_release_once() {
    let observer = Arc::new(RecordingObserver::default());
    let disposable = Disposable::new().with_observer(observer.clone());

    disposable.dispose().unwrap();
    disposable.dispose().unwrap();

    assert_eq!(
        observer.events(),
        vec![
            format!("disposing:{}", ReleaseMode::Sync),
            format!("disposed:{}", ReleaseMode::Sync),
        ]
    );
}

#[tokio::test]
async fn test_observer_sees_async_failure() {
    let observer = Arc::new(RecordingObserver::default());
    let disposable = Disposable::with_hooks(Failing).with_observer(observer.clone());

    assert!(disposable.dispose_async().await.is_err());

    let events = observer.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], format!("disposing:{}", ReleaseMode::Async));
    assert!(events[1].starts_with(&format!("failed:{}", ReleaseMode::Async)));
    assert!(events[1].contains("disk full"));
}

#[test]
fn test_observer_sees_leak() {
    let observer = Arc::new(RecordingObserver::default());
    drop(
        Disposable::new()
            .with_options(DisposeOptions::default().warn_on_leak(false))
            .with_observer(observer.clone()),
    );

    assert_eq!(observer.events(), vec!["leaked:true".to_string()]);
}

#[test]
fn test_metrics_observer_counts_releases() {
    let metrics = Arc::new(MetricsObserver::new());

    for _ in 0..3 {
        let disposable = Disposable::new().with_observer(metrics.clone());
        disposable.dispose().unwrap();
    }
    let failing = Disposable::with_hooks(Failing).with_observer(metrics.clone());
    assert!(failing.dispose().is_err());

    assert_eq!(metrics.disposed_count(), 3);
    assert_eq!(metrics.failure_count(), 1);
    assert_eq!(metrics.leak_count(), 0);
    assert!(metrics.average_release_time().is_some());

    metrics.reset();
    assert_eq!(metrics.disposed_count(), 0);
    assert!(metrics.average_release_time().is_none());
}

#[test]
fn test_logging_observer_on_container() {
    let collection = DisposableCollection::new()
        .with_observer(Arc::new(LoggingObserver::with_prefix("[test]")));
    collection.add(Arc::new(Disposable::new())).unwrap();
    collection.dispose().unwrap();
    assert!(collection.is_disposed());
}
