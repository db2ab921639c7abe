//! A thread-safe, positional list of disposables.

use std::sync::Arc;

use async_trait::async_trait;

use crate::internal::MemberSet;
use crate::state::Phase;
use crate::{
    AsyncDispose, Dispose, Disposable, DisposableId, DisposeError, DisposeObserver,
    DisposeOptions, DisposeResult, Member, PropertyChanged, Releasable, SubscriptionId,
};

/// A disposable list of disposable elements.
///
/// Same release semantics as [`DisposableCollection`](crate::DisposableCollection),
/// plus positional access. Elements are classified through [`Releasable`];
/// the default element type [`Member`] covers sync, async, both and plain
/// values. Reading an element never releases it.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Disposable, DisposableList, Member};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let resource = Arc::new(Disposable::new());
/// let list: DisposableList = [
///     Member::both(resource.clone()),
///     Member::value(Arc::new("plain value")),
/// ]
/// .into_iter()
/// .collect();
///
/// list.dispose_async().await.unwrap();
/// assert!(resource.is_disposed());
/// assert_eq!(list.len(), 2);
/// # }
/// ```
pub struct DisposableList<T = Member>
where
    T: Releasable + Clone + 'static,
{
    inner: Disposable<MemberSet<T>>,
}

impl<T> DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_options(DisposeOptions::default())
    }

    /// Creates an empty list with the given options.
    pub fn with_options(options: DisposeOptions) -> Self {
        Self::from_vec(Vec::new(), options)
    }

    fn from_vec(items: Vec<T>, options: DisposeOptions) -> Self {
        let members = MemberSet::new(items, options.sync_release_policy);
        Self {
            inner: Disposable::with_hooks(members).with_options(options),
        }
    }

    /// Attaches an observer for release events of the list itself.
    pub fn with_observer(self, observer: Arc<dyn DisposeObserver>) -> Self {
        Self {
            inner: self.inner.with_observer(observer),
        }
    }

    /// Appends an element.
    pub fn push(&self, item: T) -> DisposeResult<()> {
        self.items().mutate("add", |items| {
            items.push(item);
            Ok(())
        })
    }

    /// Inserts an element at `index`, shifting later elements.
    pub fn insert(&self, index: usize, item: T) -> DisposeResult<()> {
        self.items().mutate("insert", |items| {
            if index > items.len() {
                return Err(DisposeError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, item);
            Ok(())
        })
    }

    /// Returns a clone of the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items().read(|items| items.get(index).cloned())
    }

    /// Replaces the element at `index` and returns the previous one unreleased.
    pub fn set(&self, index: usize, item: T) -> DisposeResult<T> {
        self.items().mutate("set", |items| {
            let len = items.len();
            match items.get_mut(index) {
                Some(slot) => Ok(std::mem::replace(slot, item)),
                None => Err(DisposeError::IndexOutOfRange { index, len }),
            }
        })
    }

    /// Removes and returns the element at `index` without releasing it.
    pub fn remove_at(&self, index: usize) -> DisposeResult<T> {
        self.items().mutate("remove", |items| {
            if index >= items.len() {
                return Err(DisposeError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            Ok(items.remove(index))
        })
    }

    /// Removes every element without releasing them.
    pub fn clear(&self) -> DisposeResult<()> {
        self.items().mutate("clear", |items| {
            items.clear();
            Ok(())
        })
    }

    pub fn len(&self) -> usize {
        self.items().read(|items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every element, in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items().read(|items| items.to_vec())
    }

    /// Iterates over a snapshot taken under the lock.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    /// Releases the list and its sync-capable elements.
    pub fn dispose(&self) -> DisposeResult<()> {
        self.inner.dispose()
    }

    /// Releases the list and all releasable elements, async ones concurrently.
    ///
    /// # Errors
    ///
    /// Returns every member failure, aggregated. The list is released regardless.
    ///
    /// # Panics
    ///
    /// Must be called within a Tokio runtime: async elements are released on
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

    /// Resolves once the list has been released.
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

    fn items(&self) -> &MemberSet<T> {
        self.inner.hooks()
    }
}

impl<T> DisposableList<T>
where
    T: Releasable + Clone + PartialEq + 'static,
{
    /// Position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items().read(|items| items.iter().position(|i| i == item))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Removes the first element equal to `item` without releasing it.
    pub fn remove(&self, item: &T) -> DisposeResult<bool> {
        self.items().mutate("remove", |items| {
            match items.iter().position(|i| i == item) {
                Some(pos) => {
                    items.remove(pos);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

impl<T> Default for DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect(), DisposeOptions::default())
    }
}

impl<T> std::fmt::Debug for DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposableList")
            .field("id", &self.id())
            .field("phase", &self.phase())
            .field("len", &self.len())
            .field("sealed", &self.items().is_sealed())
            .finish()
    }
}

impl<T> Dispose for DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    fn dispose(&self) -> DisposeResult<()> {
        DisposableList::dispose(self)
    }
}

#[async_trait]
impl<T> AsyncDispose for DisposableList<T>
where
    T: Releasable + Clone + 'static,
{
    async fn dispose(&self) -> DisposeResult<()> {
        self.dispose_async().await
    }
}

impl<T> Releasable for Arc<DisposableList<T>>
where
    T: Releasable + Clone + 'static,
{
    fn sync_release(&self) -> Option<&dyn Dispose> {
        Some(&**self)
    }

    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        Some(Arc::clone(self) as Arc<dyn AsyncDispose>)
    }
}
