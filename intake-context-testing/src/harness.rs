//! A minimal handler chain for end-to-end tests.
//!
//! [`HandlerChain`] plays the role of the command dispatcher: it runs each
//! [`Handler`] in order over one [`ExecutionContext`], inside the context's
//! invocation span, and stops at the first failure.
//!
//! # Example
//! ```rust,ignore
//! let mut ctx = scenario_context();
//! let chain = HandlerChain::new()
//!     .with_handler(RequireActor)
//!     .with_handler(CountAttempts);
//!
//! chain.run(&mut ctx).await?;
//! ```

use async_trait::async_trait;
use intake_context::{ContextError, ExecutionContext};
use thiserror::Error;
use tracing::{debug, Instrument};

/// Failure of a single handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A context read or write failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The handler refused to proceed.
    #[error("Handler rejected the invocation: {0}")]
    Rejected(String),
}

/// Failure of a chain run, naming the handler that stopped it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Handler '{handler}' failed: {source}")]
pub struct ChainError {
    /// Name of the failing handler
    pub handler: String,
    /// What went wrong
    pub source: HandlerError,
}

/// A command handler that reads and extends the execution context.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Handles the invocation.
    async fn handle(&self, ctx: &mut ExecutionContext) -> Result<(), HandlerError>;
}

/// Runs handlers sequentially over one context.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler in order, stopping at the first failure.
    ///
    /// Writes made by earlier handlers, including the failing one, stay in
    /// the context.
    pub async fn run(&self, ctx: &mut ExecutionContext) -> Result<(), ChainError> {
        let span = ctx.span();
        async move {
            for handler in &self.handlers {
                debug!(handler = handler.name(), "running handler");
                handler
                    .handle(ctx)
                    .await
                    .map_err(|source| ChainError {
                        handler: handler.name().to_string(),
                        source,
                    })?;
            }
            Ok::<(), ChainError>(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Append(&'static str);

    #[async_trait]
    impl Handler for Append {
        fn name(&self) -> &str {
            self.0
        }

        async fn handle(&self, ctx: &mut ExecutionContext) -> Result<(), HandlerError> {
            let mut seen: Vec<&'static str> = ctx
                .get_as::<Vec<&'static str>>("seen")?
                .cloned()
                .unwrap_or_default();
            seen.push(self.0);
            let _ = ctx.put("seen", seen)?;
            Ok(())
        }
    }

    struct Reject;

    #[async_trait]
    impl Handler for Reject {
        fn name(&self) -> &str {
            "reject"
        }

        async fn handle(&self, _ctx: &mut ExecutionContext) -> Result<(), HandlerError> {
            Err(HandlerError::Rejected("not today".to_string()))
        }
    }

    #[tokio::test]
    async fn handlers_run_in_order() {
        let chain = HandlerChain::new()
            .with_handler(Append("first"))
            .with_handler(Append("second"));
        let mut ctx = ExecutionContext::new();

        chain.run(&mut ctx).await.unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(
            ctx.get_as::<Vec<&'static str>>("seen").unwrap(),
            Some(&vec!["first", "second"])
        );
    }

    #[tokio::test]
    async fn chain_stops_at_first_failure() {
        let chain = HandlerChain::new()
            .with_handler(Append("first"))
            .with_handler(Reject)
            .with_handler(Append("never"));
        let mut ctx = ExecutionContext::new();

        let error = chain.run(&mut ctx).await.unwrap_err();

        assert_eq!(error.handler, "reject");
        assert_eq!(
            error.source,
            HandlerError::Rejected("not today".to_string())
        );
        assert_eq!(
            ctx.get_as::<Vec<&'static str>>("seen").unwrap(),
            Some(&vec!["first"])
        );
    }

    #[tokio::test]
    async fn empty_chain_leaves_context_untouched() {
        let chain = HandlerChain::new();
        let mut ctx = ExecutionContext::new();

        chain.run(&mut ctx).await.unwrap();

        assert!(chain.is_empty());
        assert!(ctx.is_empty());
    }
}
