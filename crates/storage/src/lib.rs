//! Storage abstraction and implementations for reptrack.
//!
//! This crate provides a trait-based bucket store with an in-memory
//! implementation for tests and a JSON-file implementation for real use.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory_storage;
pub mod json_storage;
pub mod bundle;

pub use trait_::{Bucket, Storage, StorageError, Result};
pub use memory_storage::MemoryStorage;
pub use json_storage::JsonStorage;
pub use bundle::StateBundle;
