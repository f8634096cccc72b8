//! Test infrastructure for the criteria crate.
//!
//! This module provides reusable fixtures, assertions and macros shared by
//! the dialect, URL and composition suites.

#![allow(dead_code, unused_imports, unused_macros)]

pub mod assertions;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use harness::*;
