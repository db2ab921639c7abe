//! Lock-guarded member storage shared by the container types.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{release_all_async, release_all_sync};
use crate::{DisposeError, DisposeResult, Releasable, ReleaseHooks, SyncReleasePolicy};

struct Members<T> {
    items: Vec<T>,
    sealed: bool,
}

/// Members of a container behind a single mutual-exclusion point.
///
/// Release seals the set and snapshots it under the lock; the members are
/// then released outside the lock. Once sealed, mutations fail with
/// [`DisposeError::UsedAfterRelease`] while reads keep working.
pub(crate) struct MemberSet<T> {
    members: Mutex<Members<T>>,
    policy: SyncReleasePolicy,
}

impl<T> MemberSet<T> {
    pub(crate) fn new(items: Vec<T>, policy: SyncReleasePolicy) -> Self {
        Self {
            members: Mutex::new(Members { items, sealed: false }),
            policy,
        }
    }

    /// Runs `f` with shared access to the members.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.members.lock().items)
    }

    /// Runs `f` with exclusive access, unless the set has been sealed.
    pub(crate) fn mutate<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Vec<T>) -> DisposeResult<R>,
    ) -> DisposeResult<R> {
        let mut members = self.members.lock();
        if members.sealed {
            return Err(DisposeError::UsedAfterRelease(op));
        }
        f(&mut members.items)
    }

    pub(crate) fn is_sealed(&self) -> bool {
        self.members.lock().sealed
    }
}

impl<T: Clone> MemberSet<T> {
    fn seal_and_snapshot(&self) -> Vec<T> {
        let mut members = self.members.lock();
        members.sealed = true;
        members.items.clone()
    }
}

#[async_trait]
impl<T> ReleaseHooks for MemberSet<T>
where
    T: Releasable + Clone + 'static,
{
    fn release_managed(&self) -> DisposeResult<()> {
        let snapshot = self.seal_and_snapshot();
        release_all_sync(&snapshot, self.policy)
    }

    async fn release_managed_async(&self) -> DisposeResult<()> {
        let snapshot = self.seal_and_snapshot();
        release_all_async(snapshot).await
    }
}
