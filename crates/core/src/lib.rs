//! Core library: configuration, metadata unwrapping, recency scoring and selection.

pub mod config;
pub mod envelope;
pub mod models;
pub mod recency;
pub mod selector;

pub use envelope::SchemaError;
