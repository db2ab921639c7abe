//! Heterogeneous container members.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{AsyncDispose, Dispose, Releasable};

/// What a member supports when its container is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Synchronous release only.
    Sync,
    /// Asynchronous release only.
    Async,
    /// Both release paths.
    Both,
    /// Neither; held but never released.
    Value,
}

/// A member of a [`DisposableCollection`](crate::DisposableCollection) or the
/// default element of a [`DisposableList`](crate::DisposableList).
///
/// Equality is identity: two members are equal when they point at the same
/// allocation.
#[derive(Clone)]
pub enum Member {
    Sync(Arc<dyn Dispose>),
    Async(Arc<dyn AsyncDispose>),
    Both {
        sync: Arc<dyn Dispose>,
        async_: Arc<dyn AsyncDispose>,
    },
    Value(Arc<dyn Any + Send + Sync>),
}

impl Member {
    /// A member released only on the synchronous path.
    pub fn sync_only<T: Dispose>(item: Arc<T>) -> Self {
        Member::Sync(item)
    }

    /// A member released only on the asynchronous path.
    pub fn async_only<T: AsyncDispose>(item: Arc<T>) -> Self {
        Member::Async(item)
    }

    /// A member supporting both release paths.
    pub fn both<T: Dispose + AsyncDispose>(item: Arc<T>) -> Self {
        Member::Both {
            sync: item.clone(),
            async_: item,
        }
    }

    /// A plain value that is held but never released.
    pub fn value<T: Any + Send + Sync>(item: Arc<T>) -> Self {
        Member::Value(item)
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Sync(_) => MemberKind::Sync,
            Member::Async(_) => MemberKind::Async,
            Member::Both { .. } => MemberKind::Both,
            Member::Value(_) => MemberKind::Value,
        }
    }

    /// Returns true when this member points at the same allocation as `item`.
    pub fn is<T: ?Sized>(&self, item: &Arc<T>) -> bool {
        self.addr() == Arc::as_ptr(item) as *const ()
    }

    /// Downcasts a [`Member::Value`] to its concrete type.
    pub fn downcast_value<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Member::Value(value) => Arc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }

    fn addr(&self) -> *const () {
        match self {
            Member::Sync(item) => Arc::as_ptr(item) as *const (),
            Member::Async(item) => Arc::as_ptr(item) as *const (),
            Member::Both { sync, .. } => Arc::as_ptr(sync) as *const (),
            Member::Value(item) => Arc::as_ptr(item) as *const (),
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Member {}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("kind", &self.kind())
            .field("addr", &self.addr())
            .finish()
    }
}

impl Releasable for Member {
    fn sync_release(&self) -> Option<&dyn Dispose> {
        match self {
            Member::Sync(item) | Member::Both { sync: item, .. } => Some(&**item),
            _ => None,
        }
    }

    fn async_release(&self) -> Option<Arc<dyn AsyncDispose>> {
        match self {
            Member::Async(item) | Member::Both { async_: item, .. } => Some(Arc::clone(item)),
            _ => None,
        }
    }
}

impl From<Arc<dyn Dispose>> for Member {
    fn from(item: Arc<dyn Dispose>) -> Self {
        Member::Sync(item)
    }
}

impl From<Arc<dyn AsyncDispose>> for Member {
    fn from(item: Arc<dyn AsyncDispose>) -> Self {
        Member::Async(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Disposable;

    #[test]
    fn identity_equality() {
        let a = Arc::new(Disposable::new());
        let b = Arc::new(Disposable::new());

        let member = Member::both(a.clone());
        assert_eq!(member.kind(), MemberKind::Both);
        assert!(member.is(&a));
        assert!(!member.is(&b));
        assert_eq!(member, Member::sync_only(a.clone()));
        assert_ne!(member, Member::both(b.clone()));

        a.dispose().unwrap();
        b.dispose().unwrap();
    }

    #[test]
    fn value_members_are_not_releasable() {
        let value = Arc::new(String::from("config"));
        let member = Member::value(value.clone());
        assert!(member.sync_release().is_none());
        assert!(member.async_release().is_none());
        assert_eq!(member.downcast_value::<String>().as_deref(), Some(&*value));
        assert!(member.downcast_value::<u32>().is_none());
    }
}
