//! The disposal state machine.
//!
//! A `DisposalState` moves `Active → Releasing → Released` exactly once.
//! The first transition is the single atomic gate that admits one releaser;
//! everyone else waits for the second.
//!
//! Only [`Phase`] is public; the state itself is driven by
//! [`Disposable`](crate::Disposable).
//!
//! ```compile_fail
//! use ferrous_dispose::state::DisposalState;
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::{Condvar, Mutex};
use tokio::sync::Notify;

const ACTIVE: u8 = 0;
const RELEASING: u8 = 1;
const RELEASED: u8 = 2;

/// Observable phase of a disposable's release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not released yet.
    Active,
    /// A release is running its hooks.
    Releasing,
    /// Released; never changes again.
    Released,
}

/// Tracks whether an entity has been released.
///
/// `released` never reverts once set. Concurrent release attempts are
/// serialized by [`try_begin`](Self::try_begin): only the caller that wins it
/// runs hooks, the others block (sync) or suspend (async) until
/// [`complete`](Self::complete) is called.
pub(crate) struct DisposalState {
    phase: AtomicU8,
    gate: Mutex<()>,
    released_cv: Condvar,
    released_notify: Notify,
}

impl DisposalState {
    /// Creates a new, active state.
    pub(crate) fn new() -> Self {
        Self {
            phase: AtomicU8::new(ACTIVE),
            gate: Mutex::new(()),
            released_cv: Condvar::new(),
            released_notify: Notify::new(),
        }
    }

    /// Returns the current phase.
    pub(crate) fn phase(&self) -> Phase {
        match self.phase.load(Ordering::Acquire) {
            ACTIVE => Phase::Active,
            RELEASING => Phase::Releasing,
            _ => Phase::Released,
        }
    }

    /// Returns true once the release has completed.
    #[inline]
    pub(crate) fn is_released(&self) -> bool {
        self.phase.load(Ordering::Acquire) == RELEASED
    }

    /// Returns true while no release has started.
    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.phase.load(Ordering::Acquire) == ACTIVE
    }

    /// Claims the right to release. Returns true for exactly one caller.
    pub(crate) fn try_begin(&self) -> bool {
        self.phase
            .compare_exchange(ACTIVE, RELEASING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Marks the state released and wakes every waiter.
    ///
    /// Returns true only for the call that performed the transition.
    pub(crate) fn complete(&self) -> bool {
        let transitioned = {
            let _gate = self.gate.lock();
            self.phase.swap(RELEASED, Ordering::AcqRel) != RELEASED
        };
        if transitioned {
            self.released_cv.notify_all();
            self.released_notify.notify_waiters();
        }
        transitioned
    }

    /// Blocks the current thread until the state is released.
    pub(crate) fn wait_released(&self) {
        let mut gate = self.gate.lock();
        while !self.is_released() {
            self.released_cv.wait(&mut gate);
        }
    }

    /// Resolves once the state is released.
    pub(crate) async fn released(&self) {
        loop {
            let notified = self.released_notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_released() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for DisposalState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisposalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposalState")
            .field("phase", &self.phase())
            .finish()
    }
}
