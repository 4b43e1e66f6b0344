//! Mock implementations of the core's collaborators

pub mod filesystem;

pub use filesystem::MockFileSystem;
