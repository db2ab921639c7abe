//! Internal implementation details.

pub(crate) mod action_bag;
pub(crate) mod fan_out;
pub(crate) mod member_set;
pub(crate) mod reentry;

pub(crate) use action_bag::ActionBag;
pub(crate) use fan_out::{release_all_async, release_all_sync};
pub(crate) use member_set::MemberSet;
pub(crate) use reentry::{is_releasing_here, with_panic_catch, ReleasingGuard, ReleasingScope};
