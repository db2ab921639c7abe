//! A thread-safe collection of heterogeneous disposables.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::internal::MemberSet;
use crate::state::Phase;
use crate::{
    AsyncDispose, Dispose, Disposable, DisposableId, DisposeObserver, DisposeOptions,
    DisposeResult, Member, PropertyChanged, Releasable, SubscriptionId,
};

/// A disposable collection of disposable members.
///
/// Every structural operation goes through one lock, so the collection can be
/// shared across threads. On release the members are released together:
///
/// - [`dispose`](Self::dispose) releases the sync-capable members in insertion
///   order. Async-only members are skipped, or reported, depending on
///   [`DisposeOptions::sync_release_policy`].
/// - [`dispose_async`](Self::dispose_async) releases sync-only members in
///   order, then every async-capable member concurrently, and waits for all of
///   them. One member's failure does not stop the others; failures are
///   aggregated.
///
/// The same member added twice is released twice. After release, mutations
/// return [`DisposeError::UsedAfterRelease`](crate::DisposeError::UsedAfterRelease);
/// reads keep working.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Disposable, DisposableCollection};
/// use std::sync::Arc;
///
/// let first = Arc::new(Disposable::new());
/// let second = Arc::new(Disposable::new());
///
/// let collection = DisposableCollection::new();
/// collection.add(first.clone()).unwrap();
/// collection.add(second.clone()).unwrap();
///
/// collection.dispose().unwrap();
/// assert!(first.is_disposed());
/// assert!(second.is_disposed());
/// assert!(collection.is_disposed());
/// ```
pub struct DisposableCollection {
    inner: Disposable<MemberSet<Member>>,
}

impl DisposableCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::with_options(DisposeOptions::default())
    }

    /// Creates an empty collection with the given options.
    pub fn with_options(options: DisposeOptions) -> Self {
        let members = MemberSet::new(Vec::new(), options.sync_release_policy);
        Self {
            inner: Disposable::with_hooks(members).with_options(options),
        }
    }

    /// Attaches an observer for release events of the collection itself.
    pub fn with_observer(self, observer: Arc<dyn DisposeObserver>) -> Self {
        Self {
            inner: self.inner.with_observer(observer),
        }
    }

    /// Adds a member supporting both release paths.
    pub fn add<T: Dispose + AsyncDispose>(&self, item: Arc<T>) -> DisposeResult<()> {
        self.push(Member::both(item))
    }

    /// Adds a member released only on the synchronous path.
    pub fn add_sync<T: Dispose>(&self, item: Arc<T>) -> DisposeResult<()> {
        self.push(Member::sync_only(item))
    }

    /// Adds a member released only on the asynchronous path.
    pub fn add_async<T: AsyncDispose>(&self, item: Arc<T>) -> DisposeResult<()> {
        self.push(Member::async_only(item))
    }

    /// Adds a plain value that is held but never released.
    pub fn add_value<T: Any + Send + Sync>(&self, item: Arc<T>) -> DisposeResult<()> {
        self.push(Member::value(item))
    }

    /// Adds a prepared member.
    pub fn push(&self, member: Member) -> DisposeResult<()> {
        self.members().mutate("add", |items| {
            items.push(member);
            Ok(())
        })
    }

    /// Returns true if any member points at `item`.
    pub fn contains<T: ?Sized>(&self, item: &Arc<T>) -> bool {
        self.members().read(|items| items.iter().any(|m| m.is(item)))
    }

    /// Removes the first member pointing at `item`.
    ///
    /// Returns `Ok(false)` if no member matched. The removed member is not released.
    pub fn remove<T: ?Sized>(&self, item: &Arc<T>) -> DisposeResult<bool> {
        self.members().mutate("remove", |items| {
            match items.iter().position(|m| m.is(item)) {
                Some(pos) => {
                    items.remove(pos);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    /// Removes every member without releasing them.
    pub fn clear(&self) -> DisposeResult<()> {
        self.members().mutate("clear", |items| {
            items.clear();
            Ok(())
        })
    }

    pub fn len(&self) -> usize {
        self.members().read(|items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every member, in insertion order.
    pub fn members_snapshot(&self) -> Vec<Member> {
        self.members().read(|items| items.to_vec())
    }

    /// Snapshot of the members supporting synchronous release.
    pub fn sync_members(&self) -> Vec<Arc<dyn Dispose>> {
        self.members().read(|items| {
            items
                .iter()
                .filter_map(|m| match m {
                    Member::Sync(item) | Member::Both { sync: item, .. } => Some(Arc::clone(item)),
                    _ => None,
                })
                .collect()
        })
    }

    /// Snapshot of the members supporting asynchronous release.
    pub fn async_members(&self) -> Vec<Arc<dyn AsyncDispose>> {
        self.members().read(|items| items.iter().filter_map(|m| m.async_release()).collect())
    }

    /// Releases the collection and its sync-capable members.
    pub fn dispose(&self) -> DisposeResult<()> {
        self.inner.dispose()
    }

    /// Releases the collection and all releasable members, async ones concurrently.
    ///
    /// # Errors
    ///
    /// Returns every member failure, aggregated. The collection is released regardless.
    ///
    /// # Panics
    ///
    /// Must be called within a Tokio runtime: async members are released on
    /// spawned tasks.
    pub async fn dispose_async(&self) -> DisposeResult<()> {
        self.inner.dispose_async().await
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase()
    }

    pub fn id(&self) -> DisposableId {
        self.inner.id()
    }

    /// Resolves once the collection has been released.
    pub async fn released(&self) {
        self.inner.released().await
    }

    /// Registers a handler for the released-state change.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.inner.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    pub fn suppress_finalize(&self) {
        self.inner.suppress_finalize()
    }

    fn members(&self) -> &MemberSet<Member> {
        self.inner.hooks()
    }
}

impl Default for DisposableCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisposableCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposableCollection")
            .field("id", &self.id())
            .field("phase", &self.phase())
            .field("len", &self.len())
            .field("sealed", &self.members().is_sealed())
            .finish()
    }
}

impl Dispose for DisposableCollection {
    fn dispose(&self) -> DisposeResult<()> {
        DisposableCollection::dispose(self)
    }
}

#[async_trait]
impl AsyncDispose for DisposableCollection {
    async fn dispose(&self) -> DisposeResult<()> {
        self.dispose_async().await
    }
}

impl Releasable for Arc<DisposableCollection> {
    fn sync_release(&self) -> Option<&dyn Dispose> {
        Some(&**self)
    }

    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        Some(Arc::clone(self) as Arc<dyn AsyncDispose>)
    }
}

impl FromIterator<Member> for DisposableCollection {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let options = DisposeOptions::default();
        let members = MemberSet::new(iter.into_iter().collect(), options.sync_release_policy);
        Self {
            inner: Disposable::with_hooks(members).with_options(options),
        }
    }
}
