//! Disposal traits for resource cleanup.

use crate::DisposeResult;

/// Trait for synchronous resource disposal.
///
/// Implement this trait for resources that need structured teardown (e.g., flushing caches,
/// closing files). Members of a [`DisposableCollection`](crate::DisposableCollection) that
/// implement it are released in insertion order when the container is disposed.
///
/// Implementations should be idempotent: a container does not deduplicate its members, so
/// the same resource may be asked to dispose more than once.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{Dispose, DisposeResult, DisposableCollection};
/// use std::sync::Arc;
///
/// struct Cache {
///     name: String,
/// }
///
/// impl Dispose for Cache {
///     fn dispose(&self) -> DisposeResult<()> {
///         println!("Flushing cache: {}", self.name);
///         Ok(())
///     }
/// }
///
/// let bag = DisposableCollection::new();
/// bag.add_sync(Arc::new(Cache { name: "user_cache".to_string() })).unwrap();
/// bag.dispose().unwrap();
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform synchronous cleanup of resources.
    fn dispose(&self) -> DisposeResult<()>;
}

/// Trait for asynchronous resource disposal.
///
/// Implement this trait for resources that require async teardown (e.g., graceful connection
/// shutdown, async I/O cleanup). Async members of a container are released concurrently.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{AsyncDispose, DisposeResult, DisposableCollection};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct DatabaseClient {
///     connection_id: String,
/// }
///
/// #[async_trait]
/// impl AsyncDispose for DatabaseClient {
///     async fn dispose(&self) -> DisposeResult<()> {
///         println!("Closing database connection: {}", self.connection_id);
///         Ok(())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bag = DisposableCollection::new();
/// bag.add_async(Arc::new(DatabaseClient {
///     connection_id: "conn_123".to_string(),
/// })).unwrap();
/// bag.dispose_async().await.unwrap();
/// # }
/// ```
#[async_trait::async_trait]
pub trait AsyncDispose: Send + Sync + 'static {
    /// Perform asynchronous cleanup of resources.
    async fn dispose(&self) -> DisposeResult<()>;
}
