//! Disposables that run callbacks on release.

use parking_lot::Mutex;

use crate::internal::ActionBag;
use crate::{Disposable, DisposeError, DisposeResult, ReleaseHooks};

/// A disposable that runs an ordered list of callbacks on release.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::ActionDisposable;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let closed = Arc::new(AtomicBool::new(false));
/// let flag = closed.clone();
/// let guard = ActionDisposable::from_action(move || flag.store(true, Ordering::SeqCst));
///
/// guard.dispose().unwrap();
/// assert!(closed.load(Ordering::SeqCst));
/// ```
pub type ActionDisposable = Disposable<Actions>;

/// Ordered release callbacks, run once during managed release.
///
/// Callbacks run in registration order on both release paths. The first
/// failing callback stops the sequence and its error is returned; the
/// remaining callbacks are dropped without running.
#[derive(Default)]
pub struct Actions {
    bag: Mutex<ActionBag>,
}

impl Actions {
    /// Creates an empty callback list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an infallible callback.
    pub fn run<F>(self, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.bag.lock().push_infallible(action);
        self
    }

    /// Appends a callback whose failure is reported by `dispose`.
    pub fn try_run<F>(self, action: F) -> Self
    where
        F: FnOnce() -> DisposeResult<()> + Send + 'static,
    {
        self.bag.lock().push(action);
        self
    }

    /// Number of callbacks not yet run.
    pub fn len(&self) -> usize {
        self.bag.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.lock().is_empty()
    }
}

impl ReleaseHooks for Actions {
    fn release_managed(&self) -> DisposeResult<()> {
        let mut bag = std::mem::take(&mut *self.bag.lock());
        bag.run_all_in_order()
    }
}

impl Disposable<Actions> {
    /// Creates a disposable that runs `action` on release.
    pub fn from_action<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Disposable::with_hooks(Actions::new().run(action))
    }

    /// Creates a disposable from a prepared callback list.
    ///
    /// # Errors
    ///
    /// Returns [`DisposeError::InvalidArgument`] if `actions` is empty.
    pub fn from_actions(actions: Actions) -> DisposeResult<Self> {
        if actions.is_empty() {
            return Err(DisposeError::InvalidArgument("actions"));
        }
        Ok(Disposable::with_hooks(actions))
    }

    /// Creates a disposable that runs every callback of `actions` in order.
    ///
    /// # Errors
    ///
    /// Returns [`DisposeError::InvalidArgument`] if `actions` yields nothing.
    pub fn from_fns<I, F>(actions: I) -> DisposeResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() + Send + 'static,
    {
        let actions = actions
            .into_iter()
            .fold(Actions::new(), |acc, action| acc.run(action));
        Self::from_actions(actions)
    }

    /// Number of callbacks that have not run yet.
    pub fn pending_actions(&self) -> usize {
        self.hooks().len()
    }
}
