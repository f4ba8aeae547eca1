//! Shared test utilities for logdex integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. All helpers are deterministic: log files live in a
//! fresh temp directory per test and every collaborator records what it saw.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod recording;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use recording::*;
