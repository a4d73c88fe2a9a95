//! Construction-time storage restrictions for execution contexts.
//!
//! A dispatcher that wants handlers to see a frozen or bounded context picks
//! a [`ContextConfig`] up front. Limits use `nutype` validation so an invalid
//! configuration cannot be constructed, and everything deserializes with
//! `serde` so the embedding application can load it from its own settings.

use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Maximum number of entries a bounded context may hold.
///
/// Validated to be at least 1; an unbounded context uses no limit at all
/// rather than a zero.
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Into,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct MaxEntries(usize);

/// Storage restrictions applied to an [`ExecutionContext`](crate::ExecutionContext).
///
/// The default is unrestricted, which matches the behavior of a plain map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Upper bound on the number of entries. `None` means unbounded.
    pub max_entries: Option<MaxEntries>,
    /// Reject every mutation after construction.
    pub read_only: bool,
    /// Reject values that do not match their type-identity key at write time.
    pub strict_type_keys: bool,
}

impl ContextConfig {
    /// No restrictions.
    pub const fn unrestricted() -> Self {
        Self {
            max_entries: None,
            read_only: false,
            strict_type_keys: false,
        }
    }

    /// A context that can only be read once built.
    pub const fn frozen() -> Self {
        Self {
            max_entries: None,
            read_only: true,
            strict_type_keys: false,
        }
    }

    /// A context holding at most `max_entries` entries.
    pub const fn bounded(max_entries: MaxEntries) -> Self {
        Self {
            max_entries: Some(max_entries),
            read_only: false,
            strict_type_keys: false,
        }
    }

    /// Set the entry limit.
    #[must_use]
    pub const fn with_max_entries(mut self, max_entries: MaxEntries) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Toggle read-only mode.
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Toggle write-time checking of type-identity keys.
    #[must_use]
    pub const fn with_strict_type_keys(mut self, strict: bool) -> Self {
        self.strict_type_keys = strict;
        self
    }
}
