//! Test modules for StoreZen.
//!
//! Cross-cutting tests for configuration and error handling live here, along
//! with the shared fixtures and proptest strategies used by the component
//! test modules.

pub mod error_tests;

pub use test_utils::{catalog_strategy, TestFixture};
