//! Property test generators for context keys and values.
//!
//! # Example
//! ```rust
//! use intake_context::ExecutionContext;
//! use intake_context_testing::generators::{arb_key, arb_scalar};
//! use proptest::prelude::*;
//!
//! proptest!(|(key in arb_key(), scalar in arb_scalar())| {
//!     let mut ctx = ExecutionContext::new();
//!     scalar.put_into(&mut ctx, key.clone()).unwrap();
//!     prop_assert!(scalar.is_stored_under(&ctx, key));
//! });
//! ```

use intake_context::{ContextResult, ExecutionContext, Key, Value};
use proptest::prelude::*;

/// A small closed set of value types used to populate contexts in tests.
///
/// A `Scalar` is stored as its inner value (`i64`, `String`, or `bool`), not
/// as the enum, so generated contexts hold genuinely heterogeneous values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Stored as `i64`
    Int(i64),
    /// Stored as `String`
    Text(String),
    /// Stored as `bool`
    Flag(bool),
}

impl Scalar {
    /// Stores the inner value under `key`.
    pub fn put_into(
        &self,
        ctx: &mut ExecutionContext,
        key: impl Into<Key>,
    ) -> ContextResult<Option<Value>> {
        match self {
            Self::Int(value) => ctx.put(key, *value),
            Self::Text(value) => ctx.put(key, value.clone()),
            Self::Flag(value) => ctx.put(key, *value),
        }
    }

    /// Whether `key` holds exactly this scalar's inner value.
    pub fn is_stored_under(&self, ctx: &ExecutionContext, key: impl Into<Key>) -> bool {
        ctx.get(key).is_some_and(|value| self.matches(value))
    }

    /// Whether `value` is this scalar's inner value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Int(expected) => value.equals(expected),
            Self::Text(expected) => value.equals(expected),
            Self::Flag(expected) => value.equals(expected),
        }
    }

    /// Whether any entry of `ctx` holds this scalar's inner value.
    pub fn is_contained_in(&self, ctx: &ExecutionContext) -> bool {
        match self {
            Self::Int(value) => ctx.contains_value(value),
            Self::Text(value) => ctx.contains_value(value),
            Self::Flag(value) => ctx.contains_value(value),
        }
    }
}

/// Generates string keys.
pub fn arb_name_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}"
}

/// Generates integer keys.
pub fn arb_int_key() -> impl Strategy<Value = Key> {
    any::<i64>().prop_map(Key::new)
}

/// Generates keys of mixed kinds: strings, integers, and type identities.
pub fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => arb_name_key().prop_map(Key::from),
        2 => arb_int_key(),
        1 => Just(Key::of_type::<String>()),
        1 => Just(Key::of_type::<Scalar>()),
    ]
}

/// Generates scalar values.
pub fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i64>().prop_map(Scalar::Int),
        "[a-zA-Z0-9 ]{0,24}".prop_map(Scalar::Text),
        any::<bool>().prop_map(Scalar::Flag),
    ]
}

/// Generates a sequence of writes, possibly repeating keys.
pub fn arb_entries() -> impl Strategy<Value = Vec<(Key, Scalar)>> {
    prop::collection::vec((arb_key(), arb_scalar()), 0..32)
}
