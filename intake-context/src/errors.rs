//! Error types for intake-context.
//!
//! Every failure of an [`ExecutionContext`](crate::ExecutionContext)
//! operation is a caller precondition violation, signalled synchronously from
//! the offending call. The context is never left partially modified.
//!
//! # Error Categories
//!
//! - **Type mismatch**: a checked read found a value of a different type
//!   ([`ContextError::TypeMismatch`]).
//! - **Unsupported mutation**: the context was configured to reject the write
//!   ([`ContextError::ReadOnly`], [`ContextError::CapacityExceeded`]).
//! - **Key/value incompatibility**: the configured storage constraints forbid
//!   the key/value pair ([`ContextError::IncompatibleValue`]).
//!
//! # Example Usage
//!
//! ```rust
//! use intake_context::{ContextError, ExecutionContext, Key};
//!
//! let mut ctx = ExecutionContext::new();
//! ctx.put(Key::of_type::<String>(), 42_i32)?;
//!
//! match ctx.get_typed::<String>() {
//!     Err(ContextError::TypeMismatch { found, .. }) => assert_eq!(found, "i32"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! # Ok::<(), ContextError>(())
//! ```

use thiserror::Error;

/// Errors raised by [`ExecutionContext`](crate::ExecutionContext) operations.
///
/// # Error Handling Strategy
///
/// - **TypeMismatch**: a handler and its upstream disagree on what a key
///   holds. Fix the writer or the reader.
/// - **ReadOnly** / **CapacityExceeded**: the dispatcher handed out a
///   restricted context. Handlers that need to write must guard the write
///   or be handed an unrestricted context.
/// - **IncompatibleValue**: a strict context refused a value that does not
///   match its type-identity key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A value is present under the key but is not of the requested type.
    #[error("Type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Rendered key that was read
        key: String,
        /// The type the caller asked for
        expected: &'static str,
        /// The type actually stored
        found: &'static str,
    },

    /// The context was constructed read-only and rejects every mutation.
    #[error("Context is read-only: cannot modify key {key}")]
    ReadOnly {
        /// Rendered key of the rejected write
        key: String,
    },

    /// Adding the key would grow the context past its configured limit.
    #[error("Context is full ({max_entries} entries): cannot add key {key}")]
    CapacityExceeded {
        /// Rendered key of the rejected write
        key: String,
        /// The configured entry limit
        max_entries: usize,
    },

    /// A strict context refused a value that does not match its type key.
    #[error("Key {key} only accepts {key_type}, got {value_type}")]
    IncompatibleValue {
        /// Rendered key of the rejected write
        key: String,
        /// The type named by the type-identity key
        key_type: &'static str,
        /// The type of the rejected value
        value_type: &'static str,
    },
}

impl ContextError {
    /// Whether the storage itself refused the write, as opposed to the
    /// caller supplying mismatched data.
    pub const fn is_unsupported_mutation(&self) -> bool {
        matches!(self, Self::ReadOnly { .. } | Self::CapacityExceeded { .. })
    }
}

/// Result alias for context operations.
pub type ContextResult<T> = Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_mutation_covers_storage_rejections_only() {
        let read_only = ContextError::ReadOnly {
            key: "\"actor\"".to_string(),
        };
        let full = ContextError::CapacityExceeded {
            key: "\"actor\"".to_string(),
            max_entries: 1,
        };
        let mismatch = ContextError::TypeMismatch {
            key: "type alloc::string::String".to_string(),
            expected: "alloc::string::String",
            found: "i32",
        };

        assert!(read_only.is_unsupported_mutation());
        assert!(full.is_unsupported_mutation());
        assert!(!mismatch.is_unsupported_mutation());
    }

    #[test]
    fn messages_name_the_key_and_types() {
        let error = ContextError::IncompatibleValue {
            key: "type alloc::string::String".to_string(),
            key_type: "alloc::string::String",
            value_type: "i32",
        };

        assert_eq!(
            error.to_string(),
            "Key type alloc::string::String only accepts alloc::string::String, got i32"
        );
    }
}
