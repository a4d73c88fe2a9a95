//! The execution context threaded through one command invocation.
//!
//! An [`ExecutionContext`] is a mutable, heterogeneous key→value store. The
//! dispatcher creates one per invocation, pre-populates ambient entries such
//! as the session or the invoking actor, and passes it explicitly to each
//! handler in the chain. Handlers read those entries and may add derived ones
//! for handlers further down. Nothing here is process-global: a context lives
//! exactly as long as the call chain that owns it.
//!
//! # Null entries
//!
//! A key may be bound to the null value ([`ExecutionContext::put_null`]). The
//! entry exists, so [`contains_key`](ExecutionContext::contains_key) is true,
//! but [`get`](ExecutionContext::get) returns `None` exactly as it does for a
//! missing key. Callers that need to tell the two apart check
//! `contains_key`.
//!
//! # Example
//!
//! ```rust
//! use intake_context::ExecutionContext;
//!
//! let mut ctx = ExecutionContext::new();
//! ctx.put("actor", String::from("alice"))?;
//! ctx.put("retries", 3_u32)?;
//!
//! assert_eq!(ctx.get_as::<String>("actor")?.map(String::as_str), Some("alice"));
//! assert_eq!(ctx.get_as::<u32>("retries")?, Some(&3));
//! assert!(!ctx.contains_key("missing"));
//! # Ok::<(), intake_context::ContextError>(())
//! ```

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info_span, trace, Span};

use crate::config::{ContextConfig, MaxEntries};
use crate::errors::{ContextError, ContextResult};
use crate::invocation::InvocationId;
use crate::key::Key;
use crate::value::Value;

/// A context shared between concurrently running handlers.
///
/// [`ExecutionContext`] has no internal locking; callers that fan one context
/// out to several threads wrap it in this mutex via
/// [`ExecutionContext::into_shared`].
pub type SharedContext = Arc<Mutex<ExecutionContext>>;

/// Contextual data for a single command invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    entries: HashMap<Key, Option<Value>>,
    config: ContextConfig,
    invocation_id: InvocationId,
    parent: Option<InvocationId>,
}

impl ExecutionContext {
    /// Creates an empty, unrestricted context for a new invocation.
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Creates an empty context with the given storage restrictions.
    ///
    /// A read-only context created this way stays empty; use
    /// [`ExecutionContext::builder`] to pre-populate one.
    pub fn with_config(config: ContextConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            invocation_id: InvocationId::new(),
            parent: None,
        }
    }

    /// Starts building a pre-populated context.
    pub fn builder() -> ExecutionContextBuilder {
        ExecutionContextBuilder::new()
    }

    /// Whether an entry exists for `key`, including one bound to null.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Whether any entry holds a `T` equal to `value`.
    ///
    /// This scans every entry. Values of other types never match, even if
    /// they would compare equal after a conversion.
    pub fn contains_value<T: PartialEq + Any>(&self, value: &T) -> bool {
        self.entries
            .values()
            .flatten()
            .any(|stored| stored.equals(value))
    }

    /// Whether any entry is bound to the null value.
    pub fn contains_null(&self) -> bool {
        self.entries.values().any(Option::is_none)
    }

    /// Returns the value bound to `key`.
    ///
    /// `None` means the key is missing *or* bound to null.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into()).and_then(Option::as_ref)
    }

    /// Returns the value stored under the type-identity key of `T`.
    ///
    /// # Errors
    ///
    /// [`ContextError::TypeMismatch`] if the slot holds a value that is not a
    /// `T`. The context does not check key/value correspondence on write
    /// unless it was built with strict type keys, so such values can exist.
    pub fn get_typed<T: Any>(&self) -> ContextResult<Option<&T>> {
        self.get_as::<T>(Key::of_type::<T>())
    }

    /// Returns the value bound to `key`, downcast to `T`.
    ///
    /// # Errors
    ///
    /// [`ContextError::TypeMismatch`] if a value is present but is not a `T`.
    pub fn get_as<T: Any>(&self, key: impl Into<Key>) -> ContextResult<Option<&T>> {
        let key = key.into();
        let Some(value) = self.get(&key) else {
            return Ok(None);
        };

        value
            .downcast_ref::<T>()
            .map(Some)
            .ok_or_else(|| ContextError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
                found: value.type_name(),
            })
    }

    /// Binds `value` to `key`, returning the previous value.
    ///
    /// The previous value is `None` when the key was missing or bound to null.
    ///
    /// # Errors
    ///
    /// - [`ContextError::ReadOnly`] if the context rejects mutation.
    /// - [`ContextError::CapacityExceeded`] if `key` is new and the context is
    ///   at its entry limit.
    /// - [`ContextError::IncompatibleValue`] if the context checks type keys
    ///   and `value` is not of the type `key` names.
    ///
    /// On error the context is unchanged.
    pub fn put<V: Any + Send + Sync>(
        &mut self,
        key: impl Into<Key>,
        value: V,
    ) -> ContextResult<Option<Value>> {
        self.insert(key.into(), Some(Value::new(value)))
    }

    /// Binds `key` to the null value, returning the previous value.
    ///
    /// Fails under the same read-only and capacity rules as
    /// [`put`](Self::put); a null value is compatible with any type key.
    pub fn put_null(&mut self, key: impl Into<Key>) -> ContextResult<Option<Value>> {
        self.insert(key.into(), None)
    }

    /// Stores `value` under its own type-identity key.
    pub fn put_typed<T: Any + Send + Sync>(&mut self, value: T) -> ContextResult<Option<Value>> {
        self.put(Key::of_type::<T>(), value)
    }

    /// Deletes the entry for `key`, returning its value.
    ///
    /// # Errors
    ///
    /// [`ContextError::ReadOnly`] if the context rejects mutation.
    pub fn remove(&mut self, key: impl Into<Key>) -> ContextResult<Option<Value>> {
        let key = key.into();
        if self.config.read_only {
            return Err(ContextError::ReadOnly {
                key: key.to_string(),
            });
        }

        let removed = self.entries.remove(&key);
        trace!(
            invocation_id = %self.invocation_id,
            key = %key,
            removed = removed.is_some(),
            "context entry removed"
        );
        Ok(removed.flatten())
    }

    /// Number of entries, counting null entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, Option<&Value>)> {
        self.entries.iter().map(|(key, value)| (key, value.as_ref()))
    }

    /// The invocation this context belongs to.
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    /// The invocation this context was inherited from, if any.
    pub const fn parent_invocation_id(&self) -> Option<InvocationId> {
        self.parent
    }

    /// The storage restrictions in effect.
    pub const fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Creates a child context for a nested invocation.
    ///
    /// The child starts with a copy of every entry and the same restrictions,
    /// gets a fresh [`InvocationId`], and records this context as its parent.
    /// Writes to either context are not visible in the other.
    pub fn inherit(&self) -> Self {
        let child = Self {
            entries: self.entries.clone(),
            config: self.config,
            invocation_id: InvocationId::new(),
            parent: Some(self.invocation_id),
        };
        debug!(
            parent_invocation_id = %self.invocation_id,
            invocation_id = %child.invocation_id,
            entries = child.entries.len(),
            "inherited execution context"
        );
        child
    }

    /// A span identifying this invocation, for dispatchers to enter while
    /// handlers run.
    pub fn span(&self) -> Span {
        match self.parent {
            Some(parent) => info_span!(
                "invocation",
                invocation_id = %self.invocation_id,
                parent_invocation_id = %parent
            ),
            None => info_span!("invocation", invocation_id = %self.invocation_id),
        }
    }

    /// Moves the context behind a mutex for use from several threads.
    pub fn into_shared(self) -> SharedContext {
        Arc::new(Mutex::new(self))
    }

    fn insert(&mut self, key: Key, value: Option<Value>) -> ContextResult<Option<Value>> {
        self.check_write(&key, value.as_ref())?;

        let previous = self.entries.insert(key.clone(), value);
        trace!(
            invocation_id = %self.invocation_id,
            key = %key,
            replaced = previous.is_some(),
            "context entry written"
        );
        Ok(previous.flatten())
    }

    fn check_write(&self, key: &Key, value: Option<&Value>) -> ContextResult<()> {
        if self.config.read_only {
            return Err(ContextError::ReadOnly {
                key: key.to_string(),
            });
        }

        if let Some(limit) = self.config.max_entries {
            let max_entries = limit.into_inner();
            if self.entries.len() >= max_entries && !self.entries.contains_key(key) {
                return Err(ContextError::CapacityExceeded {
                    key: key.to_string(),
                    max_entries,
                });
            }
        }

        if self.config.strict_type_keys {
            if let (Some(key_type), Some(value)) = (key.type_name(), value) {
                if key.type_id_key() != Some(value.value_type_id()) {
                    return Err(ContextError::IncompatibleValue {
                        key: key.to_string(),
                        key_type,
                        value_type: value.type_name(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder for pre-populated, optionally restricted contexts.
///
/// Entries are inserted before the read-only flag takes effect, so a frozen
/// context can still carry ambient data. The entry limit and strict type
/// keys do apply to the builder's entries.
///
/// # Example
///
/// ```rust
/// use intake_context::{ContextError, ExecutionContext};
///
/// let ctx = ExecutionContext::builder()
///     .entry("actor", String::from("alice"))
///     .read_only()
///     .build()?;
///
/// assert!(ctx.contains_key("actor"));
/// assert!(ctx.clone().put("actor", String::from("bob")).is_err());
/// # Ok::<(), ContextError>(())
/// ```
#[derive(Debug, Default)]
pub struct ExecutionContextBuilder {
    entries: Vec<(Key, Option<Value>)>,
    config: ContextConfig,
    invocation_id: Option<InvocationId>,
}

impl ExecutionContextBuilder {
    /// Creates a builder for an empty, unrestricted context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    #[must_use]
    pub fn entry<V: Any + Send + Sync>(mut self, key: impl Into<Key>, value: V) -> Self {
        self.entries.push((key.into(), Some(Value::new(value))));
        self
    }

    /// Adds an entry bound to the null value.
    #[must_use]
    pub fn null_entry(mut self, key: impl Into<Key>) -> Self {
        self.entries.push((key.into(), None));
        self
    }

    /// Adds an entry under the value's own type-identity key.
    #[must_use]
    pub fn typed_entry<T: Any + Send + Sync>(self, value: T) -> Self {
        self.entry(Key::of_type::<T>(), value)
    }

    /// Replaces the storage restrictions wholesale.
    #[must_use]
    pub const fn config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Limits the context to `max_entries` entries.
    #[must_use]
    pub const fn max_entries(mut self, max_entries: MaxEntries) -> Self {
        self.config.max_entries = Some(max_entries);
        self
    }

    /// Freezes the context once built.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.config.read_only = true;
        self
    }

    /// Checks values against their type-identity keys on every write.
    #[must_use]
    pub const fn strict_type_keys(mut self) -> Self {
        self.config.strict_type_keys = true;
        self
    }

    /// Uses a caller-supplied invocation ID instead of a fresh one.
    #[must_use]
    pub const fn invocation_id(mut self, invocation_id: InvocationId) -> Self {
        self.invocation_id = Some(invocation_id);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// The first [`ContextError::CapacityExceeded`] or
    /// [`ContextError::IncompatibleValue`] raised while inserting the entries.
    pub fn build(self) -> ContextResult<ExecutionContext> {
        let config = self.config;
        let mut context = ExecutionContext {
            entries: HashMap::with_capacity(self.entries.len()),
            config: config.with_read_only(false),
            invocation_id: self.invocation_id.unwrap_or_default(),
            parent: None,
        };

        for (key, value) in self.entries {
            let _ = context.insert(key, value)?;
        }

        context.config = config;
        Ok(context)
    }
}
