//! The disposable base entity.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::event::{Subscribers, IS_DISPOSED};
use crate::internal::{is_releasing_here, with_panic_catch, ReleasingGuard, ReleasingScope};
use crate::observer::Observers;
use crate::state::{DisposalState, Phase};
use crate::{
    AsyncDispose, Dispose, DisposableId, DisposeObserver, DisposeOptions,
    DisposeResult, PropertyChanged, Releasable, ReleaseHooks, ReleaseMode, SubscriptionId,
};

/// An entity that releases its resources exactly once.
///
/// `Disposable` owns a [`ReleaseHooks`] set and drives it through the
/// disposal lifecycle:
///
/// - [`dispose`](Self::dispose) runs `release_managed` then `release_unmanaged`.
/// - [`dispose_async`](Self::dispose_async) runs `release_managed_async` then
///   `release_unmanaged_async`.
/// - Only the first release call runs hooks. Concurrent callers wait for it
///   and then return `Ok(())`.
/// - The entity is marked released even when a hook fails, panics, or the
///   async release is cancelled; hooks are never retried.
/// - Dropping an entity that was never released runs only
///   `release_unmanaged` (unless [`suppress_finalize`](Self::suppress_finalize)
///   was called or [`DisposeOptions::finalize_on_drop`] is off). Failures from
///   that fallback never escape `drop`.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::Disposable;
///
/// let disposable = Disposable::new();
/// assert!(!disposable.is_disposed());
///
/// disposable.dispose().unwrap();
/// disposable.dispose().unwrap(); // no-op
/// assert!(disposable.is_disposed());
/// ```
pub struct Disposable<H: ReleaseHooks = ()> {
    id: DisposableId,
    hooks: H,
    state: DisposalState,
    finalize_pending: AtomicBool,
    subscribers: Subscribers,
    observers: Observers,
    options: DisposeOptions,
}

impl Disposable<()> {
    /// Creates a disposable with no resources of its own.
    pub fn new() -> Self {
        Self::with_hooks(())
    }
}

impl Default for Disposable<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ReleaseHooks> Disposable<H> {
    /// Creates a disposable that releases through `hooks`.
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            id: DisposableId::next(),
            hooks,
            state: DisposalState::new(),
            finalize_pending: AtomicBool::new(true),
            subscribers: Subscribers::default(),
            observers: Observers::default(),
            options: DisposeOptions::default(),
        }
    }

    /// Replaces the options of this disposable.
    pub fn with_options(mut self, options: DisposeOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches an observer for release events.
    pub fn with_observer(mut self, observer: Arc<dyn DisposeObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// The identity carried by change notifications.
    pub fn id(&self) -> DisposableId {
        self.id
    }

    /// The hook set driven by this disposable.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// The options in effect.
    pub fn options(&self) -> &DisposeOptions {
        &self.options
    }

    /// Returns true once a release has completed.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.state.is_released()
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Resolves once this disposable has been released by any caller.
    pub async fn released(&self) {
        self.state.released().await
    }

    /// Registers a handler for the released-state change.
    ///
    /// The handler runs once, on the release that marks this disposable
    /// released, with `property == "is_disposed"`.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Cancels the drop-time fallback for this disposable.
    pub fn suppress_finalize(&self) {
        self.finalize_pending.store(false, Ordering::Release);
    }

    /// Returns true while the drop-time fallback is still armed.
    pub fn is_finalize_pending(&self) -> bool {
        self.finalize_pending.load(Ordering::Acquire)
    }

    /// Releases managed, then unmanaged resources.
    ///
    /// Returns immediately if already released. If another thread is
    /// releasing, blocks until it finishes. A hook calling `dispose` on its
    /// own owner returns `Ok(())` without waiting.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure. The disposable is released regardless.
    pub fn dispose(&self) -> DisposeResult<()> {
        if !self.state.try_begin() {
            if !is_releasing_here(self.id) {
                self.state.wait_released();
            }
            return Ok(());
        }

        let _releasing = ReleasingGuard::enter(self.id);
        let guard = CompletionGuard { owner: self };
        let started = Instant::now();
        self.observers.disposing(self.id, ReleaseMode::Sync);

        let result = self
            .hooks
            .release_managed()
            .and_then(|()| self.hooks.release_unmanaged());

        drop(guard);
        self.report(ReleaseMode::Sync, started, &result);
        result
    }

    /// Releases managed, then unmanaged resources asynchronously.
    ///
    /// Returns immediately if already released. If another caller is
    /// releasing, waits until it finishes. A hook that synchronously disposes
    /// its own owner while this release is being polled returns `Ok(())`
    /// without waiting.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure. The disposable is released regardless.
    pub async fn dispose_async(&self) -> DisposeResult<()> {
        if !self.state.try_begin() {
            if !is_releasing_here(self.id) {
                self.state.released().await;
            }
            return Ok(());
        }

        let guard = CompletionGuard { owner: self };
        let started = Instant::now();
        self.observers.disposing(self.id, ReleaseMode::Async);

        // Synchronous re-entry from the hooks sees this release on the polling thread
        let managed = ReleasingScope::new(self.id, self.hooks.release_managed_async());
        let result = match managed.await {
            Ok(()) => ReleasingScope::new(self.id, self.hooks.release_unmanaged_async()).await,
            Err(err) => Err(err),
        };

        drop(guard);
        self.report(ReleaseMode::Async, started, &result);
        result
    }

    fn report(&self, mode: ReleaseMode, started: Instant, result: &DisposeResult<()>) {
        if !self.observers.has_observers() {
            return;
        }
        match result {
            Ok(()) => self.observers.disposed(self.id, mode, started.elapsed()),
            Err(err) => self.observers.release_failed(self.id, mode, err),
        }
    }

    /// Marks released, notifies subscribers, disarms the drop fallback.
    fn finish(&self) {
        if self.state.complete() {
            self.subscribers.raise(&PropertyChanged {
                sender: self.id,
                property: IS_DISPOSED,
            });
        }
        self.suppress_finalize();
    }

    /// Drop-time fallback: unmanaged hook only, nothing escapes.
    fn finalize(&self) {
        let hooks = &self.hooks;
        if let Err(err) = with_panic_catch(|| hooks.release_unmanaged()) {
            self.observers.release_failed(self.id, ReleaseMode::Finalizer, &err);
            if self.options.warn_on_leak {
                eprintln!("[ferrous-dispose] Finalizer for {} failed: {}", self.id, err);
            }
        }
    }
}

/// Completes the release when dropped, including on error, panic, or
/// cancellation of `dispose_async`.
struct CompletionGuard<'a, H: ReleaseHooks> {
    owner: &'a Disposable<H>,
}

impl<H: ReleaseHooks> Drop for CompletionGuard<'_, H> {
    fn drop(&mut self) {
        self.owner.finish();
    }
}

impl<H: ReleaseHooks> Drop for Disposable<H> {
    fn drop(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let run_fallback = self.options.finalize_on_drop && self.is_finalize_pending();
        if run_fallback {
            self.finalize();
        }
        if self.options.warn_on_leak {
            eprintln!(
                "[ferrous-dispose] Disposable {} dropped without being disposed. Call dispose() or dispose_async().await before dropping.",
                self.id
            );
        }
        self.observers.leaked(self.id, run_fallback);
    }
}

impl<H: ReleaseHooks> std::fmt::Debug for Disposable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("id", &self.id)
            .field("phase", &self.state.phase())
            .field("finalize_pending", &self.is_finalize_pending())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<H: ReleaseHooks> Dispose for Disposable<H> {
    fn dispose(&self) -> DisposeResult<()> {
        Disposable::dispose(self)
    }
}

#[async_trait]
impl<H: ReleaseHooks> AsyncDispose for Disposable<H> {
    async fn dispose(&self) -> DisposeResult<()> {
        self.dispose_async().await
    }
}

impl<H: ReleaseHooks> Releasable for Arc<Disposable<H>> {
    fn sync_release(&self) -> Option<&dyn Dispose> {
        Some(&**self)
    }

    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        Some(Arc::clone(self) as Arc<dyn AsyncDispose>)
    }
}
