//! Init command implementation

use crate::{Config, OutputConfig, SourceConfig};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".swagger-resolve.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example configuration")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Missing output path"))?;
    let example = matches.get_flag("example");

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{:?} already exists; use --force to overwrite it",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = if example {
        create_example_config()
    } else {
        Config::default()
    };

    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        println!("Example configuration created for the public Petstore document.");
        println!("Build with `--features http` to fetch it, or point the source at a local file.");
    } else {
        println!("Configuration file created reading ./swagger.json.");
        println!("Edit the source and output settings to get started.");
    }

    Ok(())
}

pub fn create_example_config() -> Config {
    Config {
        source: SourceConfig::Url {
            url: "https://petstore.swagger.io/v2/swagger.json".to_string(),
        },
        output: OutputConfig {
            path: Some(PathBuf::from("./generated/petstore.resolved.json")),
            pretty: true,
        },
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_example_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let path_arg = path.to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(["init", "--example", "--output", path_arg.as_str()])
            .unwrap();
        run(&matches).await.unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, create_example_config());

        // A second run without --force refuses to overwrite
        assert!(run(&matches).await.is_err());
    }
}
