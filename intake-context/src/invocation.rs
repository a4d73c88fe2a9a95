//! Identifiers for the invocation that owns a context.

use nutype::nutype;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one command invocation.
///
/// Invocation IDs are `UUIDv7` so that contexts created in sequence sort in
/// creation order in logs.
#[nutype(
    validate(predicate = |id: &Uuid| id.get_version() == Some(uuid::Version::SortRand)),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Creates a new invocation ID with the current timestamp.
    pub fn new() -> Self {
        Self::try_new(Uuid::now_v7()).expect("now_v7 always yields a version 7 UUID")
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}
