//! In-memory book catalog
//!
//! `Catalog` owns the ordered collection of books for one session and
//! implements every catalog operation. Nothing here touches the disk; the
//! `Store` decides when to persist.
//!
//! ## Duplicate titles
//!
//! Titles are not unique. `find` and `toggle_read` act on the first match in
//! insertion order, while `remove` drops every match.

use crate::models::{Book, ReadFilter, Statistics};

/// Ordered collection of books
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already loaded collection, keeping its order
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book to the end of the catalog
    ///
    /// No validation is performed; empty fields are stored as-is.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Remove every book whose title matches (case-insensitive)
    ///
    /// Returns the number of books removed. Zero means nothing matched and
    /// the catalog is unchanged.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| !book.title_matches(title));
        before - self.books.len()
    }

    /// First book whose title matches (case-insensitive)
    pub fn find(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title_matches(title))
    }

    /// Flip the read flag of the first matching book
    ///
    /// Returns the updated book, or `None` if no title matched.
    pub fn toggle_read(&mut self, title: &str) -> Option<&Book> {
        let book = self.books.iter_mut().find(|book| book.title_matches(title))?;
        book.read = !book.read;
        Some(&*book)
    }

    /// Total, read and unread counts
    pub fn statistics(&self) -> Statistics {
        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.read).count();
        Statistics {
            total,
            read,
            unread: total - read,
        }
    }

    /// Books passing the read-status filter, in insertion order
    pub fn list(&self, filter: ReadFilter) -> Vec<&Book> {
        self.books.iter().filter(|book| filter.accepts(book)).collect()
    }
}
