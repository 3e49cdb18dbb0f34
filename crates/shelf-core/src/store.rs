//! Session storage interface
//!
//! The `Store` owns the in-memory `Catalog` for one session together with the
//! persistence handler for the library file. Every mutation that changes the
//! catalog is followed by a full rewrite of the file; reads never touch disk.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Loads existing library or starts empty
//!
//! store.add_book(Book::new("Dune").with_author("Herbert"))?;
//! let stats = store.statistics();
//! ```
//!
//! ## Failed saves
//!
//! If a save fails the error is returned and the catalog keeps the change.
//! `is_dirty()` stays true until a later `save()` succeeds. Writers are not
//! coordinated: two sessions saving the same file are last-write-wins.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{Book, ReadFilter, Statistics};
use crate::storage::{JsonPersistence, StorageResult};

/// Storage interface for one catalog session
pub struct Store {
    /// The in-memory collection
    catalog: Catalog,
    /// Library file persistence handler
    persistence: JsonPersistence,
    /// Set when the catalog holds changes the file does not
    dirty: bool,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config)
    }

    /// Open the store with a specific configuration
    ///
    /// A missing library file yields an empty catalog. A corrupt one is an
    /// error; the file is left as it is.
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let persistence = JsonPersistence::from_config(config);
        let books = persistence
            .load()
            .with_context(|| format!("Failed to load library from {:?}", persistence.path()))?;

        info!(
            "Opened library {:?} with {} book(s)",
            persistence.path(),
            books.len()
        );

        Ok(Self {
            catalog: Catalog::from_books(books),
            persistence,
            dirty: false,
        })
    }

    /// Get the persistence handler
    pub fn persistence(&self) -> &JsonPersistence {
        &self.persistence
    }

    /// Whether the catalog has changes that are not on disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ==================== Mutations ====================

    /// Append a book and persist
    pub fn add_book(&mut self, book: Book) -> StorageResult<()> {
        info!("Adding book {:?}", book.title);
        self.catalog.add(book);
        self.dirty = true;
        self.save()
    }

    /// Remove every book with a matching title and persist if any were removed
    ///
    /// Returns the number of books removed.
    pub fn remove_book(&mut self, title: &str) -> StorageResult<usize> {
        let removed = self.catalog.remove(title);
        if removed == 0 {
            return Ok(0);
        }

        info!("Removed {} book(s) titled {:?}", removed, title);
        self.dirty = true;
        self.save()?;
        Ok(removed)
    }

    /// Flip the read flag of the first matching book and persist
    ///
    /// Returns a copy of the updated book, or `None` if nothing matched.
    pub fn toggle_read(&mut self, title: &str) -> StorageResult<Option<Book>> {
        let Some(book) = self.catalog.toggle_read(title).cloned() else {
            return Ok(None);
        };

        info!("Marked {:?} as read={}", book.title, book.read);
        self.dirty = true;
        self.save()?;
        Ok(Some(book))
    }

    /// Write the full catalog to disk
    ///
    /// Callers may use this to retry after a failed mutation save.
    pub fn save(&mut self) -> StorageResult<()> {
        match self.persistence.save(self.catalog.books()) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save library: {}", e);
                Err(e)
            }
        }
    }

    // ==================== Queries ====================

    /// First book with a matching title
    pub fn find_book(&self, title: &str) -> Option<&Book> {
        self.catalog.find(title)
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    /// Books passing the read-status filter
    pub fn list_books(&self, filter: ReadFilter) -> Vec<&Book> {
        self.catalog.list(filter)
    }

    /// Total, read and unread counts
    pub fn statistics(&self) -> Statistics {
        self.catalog.statistics()
    }

    /// Number of books in the catalog
    pub fn book_count(&self) -> usize {
        self.catalog.len()
    }
}
