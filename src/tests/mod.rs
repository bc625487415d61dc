//! Test modules for the keyword automaton.
//!
//! Component tests for the data structures live next to their code; this
//! module covers the configuration and error layers and shares fixtures.

pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{keywords_strategy, TestFixture};
