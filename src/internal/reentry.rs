//! Re-entrant release detection and panic containment.

use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{DisposableId, DisposeError, DisposeResult};

// Disposables whose synchronous release is running on this thread
thread_local! {
    static RELEASING_TLS: RefCell<Vec<DisposableId>> = const { RefCell::new(Vec::new()) };
}

/// Returns true when `id` is being released further up this thread's stack.
///
/// A hook that disposes its own owner (directly or through a container cycle)
/// must not wait for a release that can only finish after it returns.
pub(crate) fn is_releasing_here(id: DisposableId) -> bool {
    RELEASING_TLS.with(|tls| tls.borrow().contains(&id))
}

/// Guard for the thread-local releasing stack.
pub(crate) struct ReleasingGuard {
    id: DisposableId,
}

impl ReleasingGuard {
    pub(crate) fn enter(id: DisposableId) -> Self {
        RELEASING_TLS.with(|tls| tls.borrow_mut().push(id));
        Self { id }
    }
}

impl Drop for ReleasingGuard {
    fn drop(&mut self) {
        RELEASING_TLS.with(|tls| {
            let mut tls = tls.borrow_mut();
            if let Some(pos) = tls.iter().rposition(|&id| id == self.id) {
                tls.remove(pos);
            }
        });
    }
}

/// Future adapter that marks `id` as releasing for the duration of each poll.
///
/// The mark never spans an `.await` point: it is pushed when the inner future
/// is polled and popped before `poll` returns, so other tasks scheduled on the
/// same thread are unaffected.
pub(crate) struct ReleasingScope<F> {
    id: DisposableId,
    inner: F,
}

impl<F> ReleasingScope<F> {
    pub(crate) fn new(id: DisposableId, inner: F) -> Self {
        Self { id, inner }
    }
}

impl<F: Future + Unpin> Future for ReleasingScope<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let _releasing = ReleasingGuard::enter(self.id);
        Pin::new(&mut self.inner).poll(cx)
    }
}

/// Runs a release hook, turning a panic into [`DisposeError::Panicked`].
pub(crate) fn with_panic_catch<F>(f: F) -> DisposeResult<()>
where
    F: FnOnce() -> DisposeResult<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(DisposeError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
