//! Validate a local blueprint file
//! Usage: blueprint-import validate <file> [--domain <domain>]

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::store::load_file;

use super::common::print_blueprint_summary;

pub fn execute(file: &Path, domain: Option<String>) -> Result<()> {
    let blueprint = load_file(file, domain.as_deref())
        .with_context(|| format!("Invalid blueprint: {}", file.display()))?;

    eprintln!("{} {} is a valid blueprint", "✓".green().bold(), file.display());
    print_blueprint_summary(&blueprint);
    Ok(())
}
