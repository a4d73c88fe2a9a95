//! `intake-context` - execution-scoped contextual data for command dispatch
//!
//! A command dispatcher hands each handler an [`ExecutionContext`]: a
//! mutable, heterogeneous key→value store carrying non-argument data such as
//! the session, the invoking actor, or raw invocation metadata. Keys are any
//! hashable value or a type identity ([`Key::of_type`]); values are any
//! `Send + Sync` type and are read back through checked downcasts.
//!
//! The context is passed explicitly down the handler chain and dropped when
//! the invocation completes. It provides no synchronization of its own; see
//! [`SharedContext`] for the opt-in locked form.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod context;
pub mod errors;
pub mod invocation;
mod key;
mod value;

pub use config::{ContextConfig, MaxEntries};
pub use context::{ExecutionContext, ExecutionContextBuilder, SharedContext};
pub use errors::{ContextError, ContextResult};
pub use invocation::InvocationId;
pub use key::Key;
pub use value::Value;
