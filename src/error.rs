//! Error types for disposal operations.

use std::fmt;

/// Disposal errors
///
/// Represents the failure conditions that can occur while constructing
/// disposables, mutating containers, or running release hooks.
///
/// # Examples
///
/// ```rust
/// use ferrous_dispose::DisposeError;
///
/// let invalid = DisposeError::InvalidArgument("actions");
/// let used = DisposeError::UsedAfterRelease("add");
/// let hook = DisposeError::hook("socket already closed");
///
/// assert_eq!(invalid.to_string(), "Invalid argument: actions");
/// println!("Error: {}", used);
/// println!("Error: {}", hook);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DisposeError {
    /// A required constructor argument was missing or empty
    InvalidArgument(&'static str),
    /// A structural operation was attempted on a released container
    UsedAfterRelease(&'static str),
    /// Positional access outside the current bounds
    IndexOutOfRange { index: usize, len: usize },
    /// A release hook reported a failure
    Hook(String),
    /// A member's release panicked while running on its own task
    Panicked(String),
    /// Async-only members were present during a synchronous release that rejects them
    AsyncOnlyMembers(usize),
    /// Several members failed during one aggregate release
    Aggregate(Vec<DisposeError>),
}

impl DisposeError {
    /// Creates a hook failure with the given message.
    pub fn hook(message: impl Into<String>) -> Self {
        DisposeError::Hook(message.into())
    }

    /// Folds the failures of an aggregate release into a single result.
    ///
    /// No failures yields `Ok(())`, a single failure is returned as is, and
    /// several are wrapped in [`DisposeError::Aggregate`] in the order they
    /// were observed.
    pub fn collect(mut errors: Vec<DisposeError>) -> DisposeResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(DisposeError::Aggregate(errors)),
        }
    }

    /// Number of leaf failures carried by this error.
    pub fn failure_count(&self) -> usize {
        match self {
            DisposeError::Aggregate(errors) => errors.iter().map(|e| e.failure_count()).sum(),
            _ => 1,
        }
    }
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisposeError::InvalidArgument(name) => write!(f, "Invalid argument: {}", name),
            DisposeError::UsedAfterRelease(op) => {
                write!(f, "Cannot {} after the container has been released", op)
            }
            DisposeError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            DisposeError::Hook(msg) => write!(f, "Release hook failed: {}", msg),
            DisposeError::Panicked(msg) => write!(f, "Release panicked: {}", msg),
            DisposeError::AsyncOnlyMembers(count) => write!(
                f,
                "{} async-only member(s) cannot be released synchronously; use dispose_async()",
                count
            ),
            DisposeError::Aggregate(errors) => {
                write!(f, "{} release failure(s): ", errors.len())?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DisposeError {}

/// Result type for disposal operations
///
/// A convenience type alias for `Result<T, DisposeError>` used throughout ferrous-dispose.
pub type DisposeResult<T> = Result<T, DisposeError>;
