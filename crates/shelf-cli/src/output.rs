//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use shelf_core::{Book, Statistics};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single book with all its fields
    pub fn print_book(&self, book: &Book) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for line in book_detail_lines(book) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(book)?);
            }
            OutputFormat::Quiet => {
                println!("{}", book.title);
            }
        }
        Ok(())
    }

    /// Print a list of books
    ///
    /// `empty_message` is shown in human mode when there is nothing to list.
    pub fn print_books(&self, books: &[&Book], empty_message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("{}", empty_message);
                    return Ok(());
                }
                for (idx, book) in books.iter().enumerate() {
                    println!("{}", book_summary_line(idx + 1, book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(books)?);
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.title);
                }
            }
        }
        Ok(())
    }

    /// Print catalog statistics
    pub fn print_statistics(&self, stats: &Statistics) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Library Statistics");
                println!("==================");
                println!();
                println!("  Total books:  {}", stats.total);
                println!("  Books read:   {}", stats.read);
                println!("  Books unread: {}", stats.unread);
                if stats.total > 0 {
                    println!("  Progress:     {:.1}% read", stats.percent_read());
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(stats)?);
            }
            OutputFormat::Quiet => {
                println!("{} {} {}", stats.total, stats.read, stats.unread);
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Multi-line detail view of one book
fn book_detail_lines(book: &Book) -> Vec<String> {
    vec![
        format!("Title:  {}", book.title),
        format!("Author: {}", or_placeholder(&book.author)),
        format!("Year:   {}", or_placeholder(&book.year)),
        format!("Genre:  {}", or_placeholder(&book.genre)),
        format!("Read:   {}", if book.read { "Yes" } else { "No" }),
    ]
}

/// One-line listing entry: position, read marker, title, author, year
fn book_summary_line(position: usize, book: &Book) -> String {
    let marker = if book.read { "x" } else { " " };
    let mut line = format!("{:>3}. [{}] {}", position, marker, truncate(&book.title, 40));
    if !book.author.is_empty() {
        line.push_str(&format!(" by {}", truncate(&book.author, 30)));
    }
    if !book.year.is_empty() {
        line.push_str(&format!(" ({})", book.year));
    }
    if !book.genre.is_empty() {
        line.push_str(&format!(" - {}", book.genre));
    }
    line
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
