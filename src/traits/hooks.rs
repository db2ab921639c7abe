//! Release hooks and member classification.

use std::sync::Arc;

use async_trait::async_trait;

use super::{AsyncDispose, Dispose};
use crate::DisposeResult;

/// The four override points of a [`Disposable`](crate::Disposable).
///
/// Managed hooks release resources that are only valid while the owner is
/// alive (other disposables, channels, handles shared through `Arc`). Unmanaged
/// hooks release resources that are safe to touch from a drop-time fallback
/// (raw descriptors, native buffers).
///
/// Every hook defaults to a no-op. The async hooks default to their sync
/// counterparts, so a hook set written for the sync path is also honored by
/// `dispose_async()`.
///
/// Hook sets compose instead of inheriting: wrap a base set with
/// [`ReleaseHooks::then`] and every hook runs on the base layer first.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Disposable, DisposeResult, ReleaseHooks};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Default)]
/// struct Socket {
///     closed: AtomicBool,
/// }
///
/// impl ReleaseHooks for Socket {
///     fn release_unmanaged(&self) -> DisposeResult<()> {
///         self.closed.store(true, Ordering::SeqCst);
///         Ok(())
///     }
/// }
///
/// let socket = Disposable::with_hooks(Socket::default());
/// socket.dispose().unwrap();
/// assert!(socket.hooks().closed.load(Ordering::SeqCst));
/// ```
#[async_trait]
pub trait ReleaseHooks: Send + Sync + 'static {
    /// Releases managed resources on the synchronous path.
    fn release_managed(&self) -> DisposeResult<()> {
        Ok(())
    }

    /// Releases unmanaged resources on the synchronous path and from the drop fallback.
    fn release_unmanaged(&self) -> DisposeResult<()> {
        Ok(())
    }

    /// Releases managed resources on the asynchronous path.
    async fn release_managed_async(&self) -> DisposeResult<()> {
        self.release_managed()
    }

    /// Releases unmanaged resources on the asynchronous path.
    async fn release_unmanaged_async(&self) -> DisposeResult<()> {
        self.release_unmanaged()
    }

    /// Stacks `layer` on top of this hook set.
    ///
    /// The combined set runs this set's hook before `layer`'s for each of the
    /// four hooks, and stops at the first failure.
    fn then<L>(self, layer: L) -> Layered<Self, L>
    where
        Self: Sized,
        L: ReleaseHooks,
    {
        Layered { base: self, layer }
    }
}

/// The base hook set: nothing to release.
impl ReleaseHooks for () {}

/// Two hook sets chained base-first. Built by [`ReleaseHooks::then`].
#[derive(Debug, Default)]
pub struct Layered<B, L> {
    pub base: B,
    pub layer: L,
}

#[async_trait]
impl<B, L> ReleaseHooks for Layered<B, L>
where
    B: ReleaseHooks,
    L: ReleaseHooks,
{
    fn release_managed(&self) -> DisposeResult<()> {
        self.base.release_managed()?;
        self.layer.release_managed()
    }

    fn release_unmanaged(&self) -> DisposeResult<()> {
        self.base.release_unmanaged()?;
        self.layer.release_unmanaged()
    }

    async fn release_managed_async(&self) -> DisposeResult<()> {
        self.base.release_managed_async().await?;
        self.layer.release_managed_async().await
    }

    async fn release_unmanaged_async(&self) -> DisposeResult<()> {
        self.base.release_unmanaged_async().await?;
        self.layer.release_unmanaged_async().await
    }
}

/// Release capabilities of a container member.
///
/// A member may support synchronous release, asynchronous release, both, or
/// neither (it is then held but never released). Containers classify members
/// through this trait when they are disposed.
pub trait Releasable: Send + Sync {
    /// The synchronous release entry point, if supported.
    fn sync_release(&self) -> Option<&dyn Dispose> {
        None
    }

    /// The asynchronous release entry point, if supported.
    ///
    /// Returned as an owned handle so the release can run on its own task.
    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        None
    }
}

impl Releasable for Arc<dyn Dispose> {
    fn sync_release(&self) -> Option<&dyn Dispose> {
        Some(&**self)
    }
}

impl Releasable for Arc<dyn AsyncDispose> {
    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        Some(Arc::clone(self))
    }
}
