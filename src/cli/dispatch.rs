use anyhow::Result;
use blueprint_import::commands::{import, list, resolve, validate};
use blueprint_import::completions::generate_completions;
use blueprint_import::config::ImporterConfig;
use clap::CommandFactory;

use super::types::{Cli, Commands};

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import {
            url,
            save,
            overwrite,
            domain,
            print,
        } => {
            let config = ImporterConfig::load(cli.config.as_deref())?;
            let options = import::ImportOptions {
                save,
                overwrite,
                domain,
            };
            import::execute(&config, url, options, print)
        }
        Commands::Resolve { url } => resolve::execute(url),
        Commands::Validate { file, domain } => validate::execute(&file, domain),
        Commands::List { domain } => {
            let config = ImporterConfig::load(cli.config.as_deref())?;
            list::execute(&config, domain)
        }
        Commands::Completions { shell } => {
            generate_completions(&mut Cli::command(), shell, &mut std::io::stdout());
            Ok(())
        }
    }
}
