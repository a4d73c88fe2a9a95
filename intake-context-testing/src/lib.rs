//! Testing utilities for `intake-context`.
//!
//! - [`generators`]: `proptest` strategies for keys and values
//! - [`fixtures`]: ready-made contexts and ambient data types
//! - [`harness`]: a minimal sequential handler chain standing in for a
//!   command dispatcher
//! - [`assertions`]: entry-level assertions with readable failure messages
//!
//! # Example Usage
//!
//! ```rust
//! use intake_context_testing::prelude::*;
//!
//! let ctx = scenario_context();
//! assert_entry_eq(&ctx, "actor", &"alice");
//! assert_missing(&ctx, "missing");
//! ```

#![forbid(unsafe_code)]

pub mod assertions;
pub mod fixtures;
pub mod generators;
pub mod harness;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::assertions::*;
    pub use super::fixtures::*;
    pub use super::generators::*;
    pub use super::harness::*;
}
