//! Data models for Shelf
//!
//! Defines the book record and the aggregate types computed over a catalog.
//! The serialized field names are the on-disk format of the library file.

use serde::{Deserialize, Serialize};

/// A single book in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Title, used as the lookup key (case-insensitive)
    pub title: String,
    /// Author name, free text
    pub author: String,
    /// Publication year, stored as entered
    pub year: String,
    /// Genre, free text
    pub genre: String,
    /// Whether the book has been read
    pub read: bool,
}

impl Book {
    /// Create an unread book with the given title and empty metadata
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the publication year
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Set the genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Set the read flag
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Case-insensitive exact comparison against the title
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Human label for the read flag
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Not Read"
        }
    }
}

/// Aggregate counts over a catalog
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
}

impl Statistics {
    /// Percentage of books read, `0.0` for an empty catalog
    pub fn percent_read(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 * 100.0 / self.total as f64
        }
    }
}

/// Read-status filter used when listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl ReadFilter {
    /// Build a filter from the `--read` / `--unread` flag pair
    pub fn from_flags(read: bool, unread: bool) -> Self {
        match (read, unread) {
            (true, false) => ReadFilter::Read,
            (false, true) => ReadFilter::Unread,
            _ => ReadFilter::All,
        }
    }

    /// Check whether a book passes this filter
    pub fn accepts(&self, book: &Book) -> bool {
        match self {
            ReadFilter::All => true,
            ReadFilter::Read => book.read,
            ReadFilter::Unread => !book.read,
        }
    }
}
