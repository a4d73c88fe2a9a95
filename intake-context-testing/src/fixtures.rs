//! Common test fixtures.
//!
//! The ambient data types here mirror what a dispatcher typically injects:
//! the invoking actor and the session it belongs to.

use intake_context::{ExecutionContext, Key};

/// The actor issuing a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor(pub String);

/// Session state for the invoking actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session identifier
    pub id: u64,
    /// Who the session belongs to
    pub actor: Actor,
}

/// The context of the end-to-end scenario: `"actor" → "alice"` and
/// `"retries" → 3_i32`.
pub fn scenario_context() -> ExecutionContext {
    let mut ctx = ExecutionContext::new();
    let _ = ctx
        .put("actor", "alice")
        .expect("unrestricted context accepts writes");
    let _ = ctx
        .put("retries", 3_i32)
        .expect("unrestricted context accepts writes");
    ctx
}

/// A context carrying a typed [`Session`] and [`Actor`] as a dispatcher
/// would inject them.
pub fn session_context(actor: &str, session_id: u64) -> ExecutionContext {
    let actor = Actor(actor.to_string());
    ExecutionContext::builder()
        .typed_entry(actor.clone())
        .typed_entry(Session {
            id: session_id,
            actor,
        })
        .build()
        .expect("unrestricted builder accepts entries")
}

/// A read-only context carrying a typed [`Actor`] under its type key and a
/// raw argument list under `"args"`.
pub fn frozen_context(actor: &str, args: &[&str]) -> ExecutionContext {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    ExecutionContext::builder()
        .entry(Key::of_type::<Actor>(), Actor(actor.to_string()))
        .entry("args", args)
        .read_only()
        .build()
        .expect("read-only builder accepts initial entries")
}
