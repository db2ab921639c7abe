//! Core traits for disposal.

mod dispose;
mod hooks;

pub use dispose::{Dispose, AsyncDispose};
pub use hooks::{Layered, Releasable, ReleaseHooks};
