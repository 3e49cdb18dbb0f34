//! Library file persistence
//!
//! Handles saving and loading the book collection to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/shelf/library.json` (configurable via
//! `Config`)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::Config;
use crate::models::Book;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the library file
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a persistence handler for the library file named by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.library_path())
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the library file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the collection from disk
    ///
    /// A missing file is an empty collection. A file that exists but is not
    /// a JSON array of books is reported as `StorageError::Corrupt` and left
    /// untouched.
    pub fn load(&self) -> StorageResult<Vec<Book>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No library file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::from_read_io(e, self.path.clone())),
        };

        let books: Vec<Book> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!("Loaded {} book(s) from {:?}", books.len(), self.path);
        Ok(books)
    }

    /// Save the full collection, replacing whatever was on disk
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = to_pretty_json(books)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} book(s) to {:?}", books.len(), self.path);
        Ok(())
    }

    /// Delete the library file if present
    pub fn delete(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, self.path.clone())),
        }
    }
}

/// Serialize with a four-space indent, the layout the library file has
/// always used
fn to_pretty_json(books: &[Book]) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books
        .serialize(&mut serializer)
        .map_err(StorageError::Serialize)?;
    Ok(buf)
}

/// Write data to a file atomically
///
/// 1. Write to a uniquely named temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
/// Each writer gets its own temp file, so concurrent saves stay
/// last-write-wins instead of interleaving.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;

    temp.write_all(data)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| StorageError::from_io(e, temp.path().to_path_buf()))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path).map_err(|e| StorageError::AtomicWriteFailed {
        from: e.file.path().to_path_buf(),
        to: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library(temp_dir: &TempDir) -> JsonPersistence {
        JsonPersistence::new(temp_dir.path().join("library.json"))
    }

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new("Dune")
                .with_author("Herbert")
                .with_year("1965")
                .with_genre("Sci-Fi"),
            Book::new("1984")
                .with_author("Orwell")
                .with_year("1949")
                .with_genre("Dystopia")
                .with_read(true),
            Book::new("dune").with_author("Someone Else"),
        ]
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);
        let books = sample_books();

        persistence.save(&books).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded, books);
    }

    #[test]
    fn test_save_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        persistence.save(&sample_books()).unwrap();
        persistence.save(&[]).unwrap();

        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        persistence.save(&sample_books()).unwrap();
        let replacement = vec![Book::new("Emma")];
        persistence.save(&replacement).unwrap();

        assert_eq!(persistence.load().unwrap(), replacement);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        for _ in 0..3 {
            persistence.save(&sample_books()).unwrap();
        }

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("library.json")]);
    }

    #[test]
    fn test_library_file_with_tmp_extension() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(temp_dir.path().join("library.tmp"));

        persistence.save(&sample_books()).unwrap();
        persistence.save(&[Book::new("Emma")]).unwrap();

        assert_eq!(persistence.load().unwrap(), vec![Book::new("Emma")]);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        persistence.save(&[Book::new("Dune")]).unwrap();

        let content = fs::read_to_string(persistence.path()).unwrap();
        let expected = "[\n    {\n        \"title\": \"Dune\",\n        \"author\": \"\",\n        \"year\": \"\",\n        \"genre\": \"\",\n        \"read\": false\n    }\n]";
        assert_eq!(content, expected);
    }

    #[test]
    fn test_load_hand_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        fs::write(
            persistence.path(),
            r#"[{"title": "Dune", "author": "Herbert", "year": "1965", "genre": "Sci-Fi", "read": true}]"#,
        )
        .unwrap();

        let books = persistence.load().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
        assert!(books[0].read);
    }

    #[test]
    fn test_load_invalid_json_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        fs::write(persistence.path(), "{ not json").unwrap();

        let err = persistence.load().unwrap_err();
        assert!(err.is_corrupt());
        // Corrupt files are never rewritten by a load
        assert_eq!(fs::read_to_string(persistence.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        fs::write(persistence.path(), r#"{"title": "Dune"}"#).unwrap();
        assert!(persistence.load().unwrap_err().is_corrupt());

        fs::write(
            persistence.path(),
            r#"[{"title": "Dune", "author": "Herbert", "year": 1965, "genre": "Sci-Fi", "read": false}]"#,
        )
        .unwrap();
        assert!(persistence.load().unwrap_err().is_corrupt());
    }

    #[test]
    fn test_load_empty_file_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        fs::write(persistence.path(), "").unwrap();
        assert!(persistence.load().unwrap_err().is_corrupt());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("library.json");
        let persistence = JsonPersistence::new(&nested);

        persistence.save(&sample_books()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_save_failure_is_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let persistence = JsonPersistence::new(blocker.join("library.json"));
        let err = persistence.save(&sample_books()).unwrap_err();

        assert!(err.is_write_failure());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = library(&temp_dir);

        // Deleting a missing file is fine
        persistence.delete().unwrap();

        persistence.save(&sample_books()).unwrap();
        persistence.delete().unwrap();
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_empty());
    }
}
