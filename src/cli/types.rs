use blueprint_import::completions::Shell;
use blueprint_import::validation::clap_domain_validator;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blueprint-import")]
#[command(about = "Import automation blueprints from the forum, GitHub and gists", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Path to a config file (default: <config dir>/blueprint-import/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a blueprint from a forum topic, GitHub file or gist URL
    Import {
        /// URL of the forum topic, GitHub file or gist
        url: String,

        /// Save the blueprint to the blueprints directory
        #[arg(short, long)]
        save: bool,

        /// Replace an existing blueprint with the same filename
        #[arg(long, requires = "save")]
        overwrite: bool,

        /// Only accept blueprints for this domain (e.g. automation)
        #[arg(short, long, value_parser = clap_domain_validator)]
        domain: Option<String>,

        /// Write the blueprint YAML to stdout
        #[arg(short, long)]
        print: bool,
    },

    /// Show which source handles a URL without fetching it
    Resolve {
        /// URL to resolve
        url: String,
    },

    /// Validate a local blueprint file
    Validate {
        /// Path to the blueprint YAML file
        file: PathBuf,

        /// Require this domain
        #[arg(short, long, value_parser = clap_domain_validator)]
        domain: Option<String>,
    },

    /// List saved blueprints
    List {
        /// Only list blueprints of this domain
        #[arg(short, long, value_parser = clap_domain_validator)]
        domain: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
