//! Show which source handles a URL and what would be fetched.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::importer::resolve;

pub fn execute(url: String) -> Result<()> {
    let resolved = resolve(&url).with_context(|| {
        "Supported urls are community forum topics, GitHub files and GitHub gists".to_string()
    })?;

    println!("{:<8} {}", "Source".dimmed(), resolved.kind);
    println!("{:<8} {}", "Fetch".dimmed(), resolved.fetch_url);
    Ok(())
}
