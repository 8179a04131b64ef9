//! Shared test utilities

pub mod source;

pub use source::StaticSource;
