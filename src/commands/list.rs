//! List stored blueprints
//! Usage: blueprint-import list [--domain <domain>]

use anyhow::Result;
use colored::Colorize;

use crate::config::ImporterConfig;
use crate::store::BlueprintStore;

pub fn execute(config: &ImporterConfig, domain: Option<String>) -> Result<()> {
    let store = BlueprintStore::new(&config.blueprints_dir);
    let stored = store.list(domain.as_deref())?;

    println!("Blueprints in {}:", store.root().display());
    println!("─────────────────────────────────────────────────────────");

    if stored.is_empty() {
        println!("(no blueprints - run 'blueprint-import import <url> --save' first)");
        return Ok(());
    }

    let mut current_domain = None;
    for entry in &stored {
        if current_domain != Some(&entry.domain) {
            println!("{}", entry.domain.bold());
            current_domain = Some(&entry.domain);
        }
        match &entry.blueprint {
            Ok(blueprint) => println!(
                "  {} {} {}",
                "✓".green(),
                entry.path,
                format!("- {}", blueprint.name()).dimmed()
            ),
            Err(e) => println!("  {} {} {}", "✗".red(), entry.path, e.to_string().red()),
        }
    }

    Ok(())
}
