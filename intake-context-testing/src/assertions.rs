//! Custom assertions for context contents.
//!
//! Each assertion distinguishes a missing key, a null entry, and a value of
//! the wrong type in its failure message, which plain `assert_eq!` on
//! [`ExecutionContext::get`] cannot.

use std::any::Any;
use std::fmt::Debug;

use intake_context::{ExecutionContext, Key};

/// Asserts that `key` holds a `T` equal to `expected`.
///
/// # Panics
/// Panics if the key is missing, null, of another type, or unequal.
///
/// # Example
/// ```rust
/// use intake_context::ExecutionContext;
/// use intake_context_testing::assertions::assert_entry_eq;
///
/// let mut ctx = ExecutionContext::new();
/// ctx.put("retries", 3_i32).unwrap();
/// assert_entry_eq(&ctx, "retries", &3_i32);
/// ```
#[track_caller]
pub fn assert_entry_eq<T>(ctx: &ExecutionContext, key: impl Into<Key>, expected: &T)
where
    T: PartialEq + Debug + Any,
{
    let key = key.into();
    assert!(ctx.contains_key(&key), "Key {key} is missing");
    match ctx.get_as::<T>(&key) {
        Ok(Some(actual)) => assert_eq!(actual, expected, "Key {key} holds an unexpected value"),
        Ok(None) => panic!("Key {key} is bound to null, expected {expected:?}"),
        Err(error) => panic!("{error}"),
    }
}

/// Asserts that `key` exists and is bound to the null value.
///
/// # Panics
/// Panics if the key is missing or holds a value.
#[track_caller]
pub fn assert_null_entry(ctx: &ExecutionContext, key: impl Into<Key>) {
    let key = key.into();
    assert!(ctx.contains_key(&key), "Key {key} is missing");
    if let Some(value) = ctx.get(&key) {
        panic!("Key {key} holds {value:?}, expected null");
    }
}

/// Asserts that no entry exists for `key`.
///
/// # Panics
/// Panics if the key exists, even if it is bound to null.
#[track_caller]
pub fn assert_missing(ctx: &ExecutionContext, key: impl Into<Key>) {
    let key = key.into();
    assert!(
        !ctx.contains_key(&key),
        "Key {key} exists with {:?}",
        ctx.get(&key)
    );
}
