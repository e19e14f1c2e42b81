//! Import a blueprint from a URL
//! Usage: blueprint-import import <url> [--save] [--overwrite] [--domain <domain>] [--print]

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::ImporterConfig;
use crate::fetch::{Fetch, HttpFetcher};
use crate::importer::fetch_blueprint_from_url;
use crate::source::ImportedBlueprint;
use crate::store::BlueprintStore;

use super::common::{print_blueprint_summary, print_section};

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub save: bool,
    pub overwrite: bool,
    /// Reject the blueprint unless it declares this domain.
    pub domain: Option<String>,
}

/// Result of [`run`].
#[derive(Debug)]
pub struct ImportOutcome {
    pub imported: ImportedBlueprint,
    pub saved_to: Option<PathBuf>,
}

/// Fetch, check and optionally save a blueprint.
pub fn run(
    fetcher: &dyn Fetch,
    store: &BlueprintStore,
    url: &str,
    options: &ImportOptions,
) -> Result<ImportOutcome> {
    let imported = fetch_blueprint_from_url(fetcher, url)
        .with_context(|| format!("Failed to import blueprint from {url}"))?;

    if let Some(expected) = &options.domain {
        let domain = imported.blueprint.domain();
        if domain != expected {
            bail!("Found incorrect blueprint type {domain}, expected {expected}");
        }
    }

    let saved_to = if options.save {
        Some(
            store
                .save(&imported, options.overwrite)
                .context("Failed to save blueprint")?,
        )
    } else {
        None
    };

    Ok(ImportOutcome { imported, saved_to })
}

/// Execute the import command.
pub fn execute(config: &ImporterConfig, url: String, options: ImportOptions, print: bool) -> Result<()> {
    let fetcher = HttpFetcher::new(config)?;
    let store = BlueprintStore::new(&config.blueprints_dir);

    eprintln!("{} {}", "Importing".blue(), url);
    let outcome = run(&fetcher, &store, &url, &options)?;

    print_section("Blueprint");
    print_blueprint_summary(&outcome.imported.blueprint);
    eprintln!(
        "  {:<12} {}",
        "Filename".dimmed(),
        outcome.imported.suggested_filename
    );

    match &outcome.saved_to {
        Some(path) => eprintln!("\n{} Saved to {}", "✓".green().bold(), path.display()),
        None if !print => eprintln!(
            "\n{} Not saved (use --save to write it to {})",
            "ℹ".blue(),
            store.root().display()
        ),
        None => {}
    }

    if print {
        print!("{}", outcome.imported.blueprint.to_yaml()?);
    }

    Ok(())
}
