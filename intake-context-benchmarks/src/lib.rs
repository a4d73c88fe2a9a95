//! Intake Context Benchmarks
//!
//! This crate contains performance benchmarks for the execution context:
//! keyed reads and writes, type-keyed lookups, value scans and inheritance.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
