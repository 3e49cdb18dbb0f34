//! Statistics command handler

use anyhow::Result;

use shelf_core::Store;

use crate::output::{Output, OutputFormat};

/// Show read/unread counts for the library
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.statistics();

    output.print_statistics(&stats)?;

    if output.format == OutputFormat::Human {
        println!();
        println!("Library: {}", store.persistence().path().display());
    }

    Ok(())
}
