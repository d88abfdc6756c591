//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("swagger-resolve")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Decode Swagger documents and inline every $ref")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::resolve::command())
            .subcommand(commands::inspect::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("resolve", sub_matches)) => commands::resolve::run(sub_matches).await,
            Some(("inspect", sub_matches)) => commands::inspect::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use crate::{Config, SourceConfig};
    use anyhow::{anyhow, Result};
    use clap::{Arg, ArgMatches, Command};
    use std::path::{Path, PathBuf};

    /// Add the config and source override arguments shared by document commands
    pub fn with_source_args(command: Command) -> Command {
        command
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .help("Configuration file path")
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("input")
                    .short('i')
                    .long("input")
                    .help("Read the Swagger document from a local file")
                    .value_name("FILE")
                    .conflicts_with("url"),
            )
            .arg(
                Arg::new("url")
                    .short('u')
                    .long("url")
                    .help("Fetch the Swagger document from a URL (requires the `http` feature)")
                    .value_name("URL"),
            )
    }

    /// Get configuration file path from arguments or look for a default one
    pub fn get_config_path(matches: &ArgMatches) -> Result<Option<PathBuf>> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            let path = PathBuf::from(config_path);
            if !path.exists() {
                return Err(anyhow!("Configuration file not found: {:?}", path));
            }
            return Ok(Some(path));
        }
        Ok(Config::discover(Path::new(".")))
    }

    /// Build the effective configuration: file (if any) plus command line overrides
    pub fn load_config(matches: &ArgMatches) -> Result<Config> {
        let override_source = source_override(matches);

        let mut config = match get_config_path(matches)? {
            Some(path) => Config::from_file(&path)?,
            None if override_source.is_some() => Config::default(),
            None => {
                return Err(anyhow!(
                    "No input given. Use --input, --url or --config, or create a config with 'swagger-resolve init'"
                ))
            }
        };

        if let Some(source) = override_source {
            config.source = source;
        }

        Ok(config)
    }

    fn source_override(matches: &ArgMatches) -> Option<SourceConfig> {
        if let Some(input) = matches.get_one::<String>("input") {
            return Some(SourceConfig::File {
                path: PathBuf::from(input),
            });
        }
        matches
            .get_one::<String>("url")
            .map(|url| SourceConfig::Url { url: url.clone() })
    }

    /// Create SwaggerResolve instance
    pub fn create_app(config: Config) -> Result<crate::SwaggerResolve> {
        crate::SwaggerResolve::new(config)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_input_overrides_source() {
            let command = with_source_args(Command::new("resolve"));
            let matches = command
                .try_get_matches_from(["resolve", "--input", "petstore.json"])
                .unwrap();

            let config = load_config(&matches).unwrap();
            assert_eq!(
                config.source,
                SourceConfig::File {
                    path: PathBuf::from("petstore.json")
                }
            );
        }

        #[test]
        fn test_input_and_url_conflict() {
            let command = with_source_args(Command::new("resolve"));
            let result = command.try_get_matches_from([
                "resolve",
                "--input",
                "a.json",
                "--url",
                "https://example.com/swagger.json",
            ]);
            assert!(result.is_err());
        }
    }
}
