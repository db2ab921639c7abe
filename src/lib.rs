//! # ferrous-dispose
//!
//! Deterministic, idempotent resource disposal for Rust, inspired by .NET's
//! `IDisposable` / `IAsyncDisposable` pattern.
//!
//! ## Features
//!
//! - **Exactly-once release**: every release hook runs at most once, even under
//!   concurrent `dispose()` / `dispose_async()` calls
//! - **Managed / unmanaged split**: the drop-time fallback only touches
//!   unmanaged resources
//! - **Composable hooks**: layer hook sets instead of inheriting them
//! - **Aggregate containers**: thread-safe collections and lists that release
//!   their members together, async members concurrently
//! - **Observability**: change notifications, observers, and leak warnings
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_dispose::{ActionDisposable, Disposable, DisposableCollection};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let flushed = Arc::new(AtomicBool::new(false));
//! let flag = flushed.clone();
//!
//! let collection = DisposableCollection::new();
//! collection.add(Arc::new(Disposable::new())).unwrap();
//! collection
//!     .add(Arc::new(ActionDisposable::from_action(move || {
//!         flag.store(true, Ordering::SeqCst);
//!     })))
//!     .unwrap();
//!
//! collection.dispose().unwrap();
//! assert!(flushed.load(Ordering::SeqCst));
//! assert!(collection.is_disposed());
//! ```
//!
//! ## Custom Hooks
//!
//! ```rust
//! use ferrous_dispose::{Disposable, DisposeResult, ReleaseHooks};
//!
//! struct Connection;
//!
//! impl ReleaseHooks for Connection {
//!     fn release_managed(&self) -> DisposeResult<()> {
//!         println!("closing session");
//!         Ok(())
//!     }
//!
//!     fn release_unmanaged(&self) -> DisposeResult<()> {
//!         println!("closing socket");
//!         Ok(())
//!     }
//! }
//!
//! let connection = Disposable::with_hooks(Connection);
//! connection.dispose().unwrap();
//! ```
//!
//! ## Async Release
//!
//! `dispose_async()` on a container spawns one task per async member, so it
//! must be awaited inside a Tokio runtime.
//!
//! ```rust
//! use ferrous_dispose::{Disposable, DisposableList, Member};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let a = Arc::new(Disposable::new());
//! let b = Arc::new(Disposable::new());
//!
//! let list = DisposableList::new();
//! list.push(Member::both(a.clone())).unwrap();
//! list.push(Member::async_only(b.clone())).unwrap();
//!
//! list.dispose_async().await.unwrap();
//! assert!(a.is_disposed() && b.is_disposed());
//! # }
//! ```

// Module declarations
pub mod action;
pub mod collection;
pub mod config;
pub mod disposable;
pub mod error;
pub mod event;
pub mod list;
pub mod member;
pub mod observer;
pub mod state;
pub mod traits;

// Internal modules
mod internal;

// Re-export core types
pub use action::{ActionDisposable, Actions};
pub use collection::DisposableCollection;
pub use config::{DisposeOptions, SyncReleasePolicy};
pub use disposable::Disposable;
pub use error::{DisposeError, DisposeResult};
pub use event::{DisposableId, PropertyChanged, SubscriptionId, IS_DISPOSED};
pub use list::DisposableList;
pub use member::{Member, MemberKind};
pub use observer::{DisposeObserver, LoggingObserver, MetricsObserver, ReleaseMode};
pub use state::Phase;
pub use traits::{AsyncDispose, Dispose, Layered, Releasable, ReleaseHooks};
