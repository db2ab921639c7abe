//! Aggregate release of container members.

use std::sync::Arc;

use tokio::task::JoinSet;

use super::reentry::{panic_message, with_panic_catch};
use crate::{AsyncDispose, Dispose, DisposeError, DisposeResult, Releasable, SyncReleasePolicy};

/// Releases every sync-capable member in order.
///
/// Every member is attempted; failures and panics are collected. Async-only members are
/// skipped, or counted and reported when `policy` rejects them.
pub(crate) fn release_all_sync<T: Releasable>(
    members: &[T],
    policy: SyncReleasePolicy,
) -> DisposeResult<()> {
    let mut errors = Vec::new();
    let mut async_only = 0usize;

    for member in members {
        match (member.sync_release(), member.async_release()) {
            (Some(sync), _) => {
                if let Err(err) = with_panic_catch(|| sync.dispose()) {
                    errors.push(err);
                }
            }
            (None, Some(_)) => async_only += 1,
            (None, None) => {}
        }
    }

    if async_only > 0 && policy == SyncReleasePolicy::Reject {
        errors.push(DisposeError::AsyncOnlyMembers(async_only));
    }

    DisposeError::collect(errors)
}

/// Releases sync-only members in order, then every async-capable member
/// concurrently, and waits for all of them.
///
/// Each async release runs on its own task, so a failing or panicking member
/// never prevents the others from completing. Panics of sync-only members are
/// contained the same way.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
pub(crate) async fn release_all_async<T: Releasable>(members: Vec<T>) -> DisposeResult<()> {
    let mut errors = Vec::new();
    let mut pending: Vec<Arc<dyn AsyncDispose>> = Vec::new();

    for member in &members {
        match (member.async_release(), member.sync_release()) {
            (Some(async_member), _) => pending.push(async_member),
            (None, Some(sync)) => {
                if let Err(err) = with_panic_catch(|| sync.dispose()) {
                    errors.push(err);
                }
            }
            (None, None) => {}
        }
    }
    drop(members);

    let mut tasks = JoinSet::new();
    for member in pending {
        tasks.spawn(async move { member.dispose().await });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => errors.push(err),
            Err(join_err) => {
                let message = if join_err.is_panic() {
                    panic_message(join_err.into_panic().as_ref())
                } else {
                    join_err.to_string()
                };
                errors.push(DisposeError::Panicked(message));
            }
        }
    }

    DisposeError::collect(errors)
}
