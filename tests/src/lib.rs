//! Shared harness for the analytics integration tests.

pub mod fixtures;
pub mod setup;
pub mod stub;
