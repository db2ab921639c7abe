use ferrous_dispose::{ActionDisposable, Actions, DisposeError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_single_action_runs_on_dispose() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = invoked.clone();

    let disposable = ActionDisposable::from_action(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(disposable.pending_actions(), 1);

    disposable.dispose().unwrap();
    disposable.dispose().unwrap();

    assert_eq!(invoked.load(Ordering::SeqCst), 1);
    assert_eq!(disposable.pending_actions(), 0);
}

#[test]
fn test_actions_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let actions = (1..=3).map(|i| {
        let order = order.clone();
        move || order.lock().unwrap().push(i)
    });
    let disposable = ActionDisposable::from_fns(actions).unwrap();

    disposable.dispose().unwrap();
    disposable.dispose().unwrap();

    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_actions_run_on_async_dispose() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();

    let disposable = ActionDisposable::from_actions(
        Actions::new()
            .run(move || first.lock().unwrap().push("f1"))
            .run(move || second.lock().unwrap().push("f2")),
    )
    .unwrap();

    disposable.dispose_async().await.unwrap();
    disposable.dispose_async().await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["f1", "f2"]);
}

#[test]
fn test_empty_action_sequence_is_invalid() {
    let result = ActionDisposable::from_actions(Actions::new());
    assert_eq!(result.unwrap_err(), DisposeError::InvalidArgument("actions"));

    let no_fns: Vec<fn()> = Vec::new();
    assert!(matches!(
        ActionDisposable::from_fns(no_fns),
        Err(DisposeError::InvalidArgument("actions"))
    ));
}

#[test]
fn test_failing_action_propagates_and_stops_sequence() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let before = ran.clone();
    let after = ran.clone();

    let disposable = ActionDisposable::from_actions(
        Actions::new()
            .run(move || before.lock().unwrap().push("before"))
            .try_run(|| Err(DisposeError::hook("callback failed")))
            .run(move || after.lock().unwrap().push("after")),
    )
    .unwrap();

    assert_eq!(disposable.dispose(), Err(DisposeError::hook("callback failed")));
    assert!(disposable.is_disposed());

    // A second call neither retries nor runs the remaining callbacks
    assert_eq!(disposable.dispose(), Ok(()));
    assert_eq!(*ran.lock().unwrap(), vec!["before"]);
}

#[test]
fn test_actions_do_not_run_on_drop() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = invoked.clone();

    let disposable = ActionDisposable::from_action(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .with_options(ferrous_dispose::DisposeOptions::default().warn_on_leak(false));
    drop(disposable);

    // Callbacks are managed release work; the drop fallback never runs them
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}
