//! Output helpers shared by commands

use colored::Colorize;

use crate::blueprint::Blueprint;

pub(crate) fn print_section(title: &str) {
    eprintln!("\n{}", title.bold());
    eprintln!("{}", "─".repeat(40).dimmed());
}

/// Print name, domain, source and inputs of a blueprint to stderr.
pub(crate) fn print_blueprint_summary(blueprint: &Blueprint) {
    let metadata = blueprint.metadata();

    eprintln!("  {:<12} {}", "Name".dimmed(), metadata.name.bold());
    eprintln!("  {:<12} {}", "Domain".dimmed(), metadata.domain);
    if let Some(author) = &metadata.author {
        eprintln!("  {:<12} {}", "Author".dimmed(), author);
    }
    if let Some(description) = &metadata.description {
        let first_line = description.lines().next().unwrap_or_default();
        eprintln!("  {:<12} {}", "Description".dimmed(), first_line);
    }
    if let Some(min_version) = metadata
        .homeassistant
        .as_ref()
        .and_then(|req| req.min_version.as_deref())
    {
        eprintln!("  {:<12} {}", "Requires".dimmed(), min_version);
    }
    if let Some(source_url) = &metadata.source_url {
        eprintln!("  {:<12} {}", "Source".dimmed(), source_url);
    }

    if metadata.inputs.is_empty() {
        eprintln!("  {:<12} {}", "Inputs".dimmed(), "(none)".dimmed());
        return;
    }
    eprintln!("  {}", "Inputs".dimmed());
    for (key, definition) in &metadata.inputs {
        match definition.as_ref().and_then(|d| d.name.as_deref()) {
            Some(name) => eprintln!("    {} {} {}", "•".blue(), key, format!("({name})").dimmed()),
            None => eprintln!("    {} {}", "•".blue(), key),
        }
    }
}
