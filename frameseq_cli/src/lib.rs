//! Frame sequence command line interface
//!
//! Library half of the `frameseq` binary: configuration, directory
//! discovery, output formatting and terminal detection.

pub mod config;
pub mod file_discovery;
pub mod output;
pub mod terminal;
