//! Builders for sequence test fixtures

pub mod sequence;

pub use sequence::SequenceFixtureBuilder;
