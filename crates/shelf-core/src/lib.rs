//! Shelf Core Library
//!
//! This crate provides the core functionality for Shelf, a personal book
//! catalog kept in a single JSON file.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a book
//! store.add_book(Book::new("Dune").with_author("Herbert"))?;
//!
//! // Query books
//! let dune = store.find_book("dune");
//! let stats = store.statistics();
//! ```
//!
//! # Modules
//!
//! - `store`: Session object that loads, mutates and saves (main entry point)
//! - `catalog`: In-memory collection and catalog operations
//! - `models`: Book record and statistics
//! - `storage`: JSON file persistence and storage errors
//! - `config`: Application configuration

pub mod catalog;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use config::Config;
pub use models::{Book, ReadFilter, Statistics};
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::Store;
