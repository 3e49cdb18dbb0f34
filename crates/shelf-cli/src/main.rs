//! Shelf CLI
//!
//! Command-line interface for Shelf - a personal book catalog.
//!
//! Each invocation is one session: the library is loaded, one command runs,
//! and the file is rewritten if the command changed anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use shelf_core::{Config, JsonPersistence, ReadFilter, StorageError, Store};

mod commands;
mod logging;
mod output;
mod prompt;

use commands::book::NewBook;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - Personal book catalog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the library
    Add {
        /// Book title
        title: String,
        /// Author
        #[arg(short, long, default_value = "")]
        author: String,
        /// Publication year
        #[arg(short, long, default_value = "")]
        year: String,
        /// Genre
        #[arg(short, long, default_value = "")]
        genre: String,
        /// Mark the book as already read
        #[arg(short, long)]
        read: bool,
    },
    /// Remove every book with the given title
    #[command(alias = "rm")]
    Remove {
        /// Book title (case-insensitive)
        title: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Find a book by title
    #[command(alias = "find")]
    Search {
        /// Book title (case-insensitive, exact)
        title: String,
    },
    /// List books in the library
    #[command(alias = "ls")]
    List {
        /// Only books already read
        #[arg(long, conflicts_with = "unread")]
        read: bool,
        /// Only books not yet read
        #[arg(long)]
        unread: bool,
    },
    /// Toggle a book between read and unread
    Toggle {
        /// Book title (case-insensitive)
        title: String,
    },
    /// Show library statistics
    Stats,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Delete the library file
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, library_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even when the library file is unreadable
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;
    logging::init(&config);

    let result = match cli.command {
        // Reset must work on a library that no longer parses
        Some(Commands::Reset { yes }) => {
            commands::book::reset(&JsonPersistence::from_config(&config), yes, &output)
        }
        command => run(command, &config, &output),
    };

    if let Err(ref e) = result {
        if let Some(hint) = e
            .downcast_ref::<StorageError>()
            .and_then(StorageError::recovery_suggestion)
        {
            eprintln!("Hint: {}", hint);
        }
    }

    result
}

fn run(command: Option<Commands>, config: &Config, output: &Output) -> Result<()> {
    let mut store = Store::open_with_config(config)?;

    match command {
        Some(Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        }) => commands::book::add(
            &mut store,
            NewBook {
                title,
                author,
                year,
                genre,
                read,
            },
            output,
        ),
        Some(Commands::Remove { title, yes }) => {
            commands::book::remove(&mut store, title, yes, output)
        }
        Some(Commands::Search { title }) => commands::book::search(&store, title, output),
        Some(Commands::List { read, unread }) => {
            commands::book::list(&store, ReadFilter::from_flags(read, unread), output)
        }
        // Listing is the default view
        None => commands::book::list(&store, ReadFilter::All, output),
        Some(Commands::Toggle { title }) => commands::book::toggle(&mut store, title, output),
        Some(Commands::Stats) => commands::stats::show(&store, output),
        Some(Commands::Reset { .. }) | Some(Commands::Config { .. }) => {
            unreachable!() // Handled in main
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Path) => commands::config::path(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
