//! Test utilities for the frame sequence engine
//!
//! This crate provides an in-memory directory reader and fixture builders
//! for testing sequence grouping without touching the real file system.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::SequenceFixtureBuilder;
pub use mocks::MockFileSystem;
