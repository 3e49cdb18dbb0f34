//! Storage layer
//!
//! Persists the catalog as a single JSON document holding an ordered array
//! of books. Every save rewrites the whole file atomically; there is no
//! incremental write path.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
