//! Book command handlers

use anyhow::{bail, Context, Result};

use shelf_core::{Book, JsonPersistence, ReadFilter, Store};

use crate::output::Output;
use crate::prompt::confirm;

/// Fields collected from `shelf add`
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Book::new(new.title)
            .with_author(new.author)
            .with_year(new.year)
            .with_genre(new.genre)
            .with_read(new.read)
    }
}

/// Add a new book
pub fn add(store: &mut Store, new: NewBook, output: &Output) -> Result<()> {
    let book = Book::from(new);
    let title = book.title.clone();

    store
        .add_book(book.clone())
        .context("Book was added in memory but could not be saved")?;

    output.success(&format!("'{}' added successfully", title));
    if !output.is_json() {
        output.print_book(&book)?;
    }
    Ok(())
}

/// Remove every book with the given title
pub fn remove(store: &mut Store, title: String, yes: bool, output: &Output) -> Result<()> {
    let matches = store
        .books()
        .iter()
        .filter(|b| b.title_matches(&title))
        .count();

    // Report the stored spelling rather than what was typed
    let stored_title = match store.find_book(&title) {
        Some(book) => book.title.clone(),
        None => bail!("Book not found: {}", title),
    };

    if !yes && output.should_prompt() {
        let prompt = if matches == 1 {
            format!("Remove '{}'?", stored_title)
        } else {
            format!("Remove {} books titled '{}'?", matches, stored_title)
        };
        if !confirm(&prompt)? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let removed = store
        .remove_book(&title)
        .context("Book was removed in memory but the library could not be saved")?;

    output.success(&removed_message(&stored_title, removed));
    Ok(())
}

/// Find a book by exact title (case-insensitive)
pub fn search(store: &Store, title: String, output: &Output) -> Result<()> {
    let book = store
        .find_book(&title)
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", title))?;

    output.print_book(book)
}

/// List books, optionally only read or unread ones
pub fn list(store: &Store, filter: ReadFilter, output: &Output) -> Result<()> {
    let books = store.list_books(filter);
    let empty_message = match filter {
        ReadFilter::All => "Your library is empty.",
        ReadFilter::Read => "No read books.",
        ReadFilter::Unread => "No unread books.",
    };

    output.print_books(&books, empty_message)
}

/// Toggle the read status of the first book with the given title
pub fn toggle(store: &mut Store, title: String, output: &Output) -> Result<()> {
    let book = store
        .toggle_read(&title)
        .context("Read status changed in memory but the library could not be saved")?
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", title))?;

    output.success(&toggled_message(&book));
    Ok(())
}

/// Delete the library file, removing every book
///
/// Works on the file directly so a library that no longer parses can still
/// be cleared.
pub fn reset(persistence: &JsonPersistence, yes: bool, output: &Output) -> Result<()> {
    let count = persistence.load().ok().map(|books| books.len());
    let described = match count {
        Some(n) => format!("{} book(s)", n),
        None => "an unreadable library".to_string(),
    };

    if !yes && output.should_prompt() {
        println!(
            "This deletes {} stored in {}",
            described,
            persistence.path().display()
        );
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    persistence
        .delete()
        .context("Failed to delete library file")?;

    output.success(&format!("Library reset ({} deleted)", described));
    Ok(())
}

fn removed_message(title: &str, removed: usize) -> String {
    format!("'{}' removed successfully ({} book(s))", title, removed)
}

fn toggled_message(book: &Book) -> String {
    format!("'{}' marked as {}", book.title, book.status_label())
}
