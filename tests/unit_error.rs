/// Unit tests for DisposeError and DisposeResult types

use ferrous_dispose::{DisposeError, DisposeResult};
use std::error::Error;

#[test]
fn test_error_display_invalid_argument() {
    let error = DisposeError::InvalidArgument("actions");
    assert_eq!(format!("{}", error), "Invalid argument: actions");
}

#[test]
fn test_error_display_used_after_release() {
    let error = DisposeError::UsedAfterRelease("insert");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Cannot insert after the container has been released");
    assert!(display_str.contains("released"));
}

#[test]
fn test_error_display_index_out_of_range() {
    let error = DisposeError::IndexOutOfRange { index: 4, len: 2 };
    assert_eq!(format!("{}", error), "Index 4 out of range for length 2");
}

#[test]
fn test_error_display_hook_and_panic() {
    assert_eq!(
        format!("{}", DisposeError::hook("socket close failed")),
        "Release hook failed: socket close failed"
    );
    assert_eq!(
        format!("{}", DisposeError::Panicked("boom".to_string())),
        "Release panicked: boom"
    );
}

#[test]
fn test_error_display_async_only_members() {
    let display_str = format!("{}", DisposeError::AsyncOnlyMembers(3));
    assert!(display_str.starts_with("3 async-only member(s)"));
    assert!(display_str.contains("dispose_async()"));
}

#[test]
fn test_error_display_aggregate() {
    let error = DisposeError::Aggregate(vec![
        DisposeError::hook("a"),
        DisposeError::Panicked("b".to_string()),
    ]);
    assert_eq!(
        format!("{}", error),
        "2 release failure(s): Release hook failed: a; Release panicked: b"
    );
}

#[test]
fn test_collect_folds_failures() {
    assert_eq!(DisposeError::collect(Vec::new()), Ok(()));
    assert_eq!(
        DisposeError::collect(vec![DisposeError::hook("only")]),
        Err(DisposeError::hook("only"))
    );

    let folded = DisposeError::collect(vec![DisposeError::hook("a"), DisposeError::hook("b")]);
    assert_eq!(
        folded,
        Err(DisposeError::Aggregate(vec![
            DisposeError::hook("a"),
            DisposeError::hook("b"),
        ]))
    );
}

#[test]
fn test_failure_count_flattens_nested_aggregates() {
    let nested = DisposeError::Aggregate(vec![
        DisposeError::hook("a"),
        DisposeError::Aggregate(vec![DisposeError::hook("b"), DisposeError::hook("c")]),
    ]);
    assert_eq!(nested.failure_count(), 3);
    assert_eq!(DisposeError::hook("single").failure_count(), 1);
}

#[test]
fn test_error_trait_and_result_alias() {
    let error = DisposeError::UsedAfterRelease("add");
    let dyn_error: &dyn Error = &error;
    assert!(dyn_error.source().is_none());

    let result: DisposeResult<u32> = Err(error.clone());
    assert_eq!(result.unwrap_err(), error);

    let ok: DisposeResult<&str> = Ok("done");
    assert_eq!(ok, Ok("done"));
}
