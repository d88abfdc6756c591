//! Resolve command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    utils::with_source_args(
        Command::new("resolve").about("Decode a Swagger document and inline every $ref"),
    )
    .arg(
        clap::Arg::new("output")
            .short('o')
            .long("output")
            .help("Write the resolved document to this file instead of stdout")
            .value_name("FILE"),
    )
    .arg(
        clap::Arg::new("compact")
            .long("compact")
            .help("Emit compact JSON")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        clap::Arg::new("allow-unresolved")
            .long("allow-unresolved")
            .help("Leave references without a matching definition un-inlined")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = utils::load_config(matches)?;

    if let Some(output_path) = matches.get_one::<String>("output") {
        config.output.path = Some(PathBuf::from(output_path));
    }
    if matches.get_flag("compact") {
        config.output.pretty = false;
    }
    if matches.get_flag("allow-unresolved") {
        config.resolution.fail_on_unresolved = false;
    }

    info!("Resolving {}", config.source.describe());

    let app = utils::create_app(config)?;
    let (document, stats) = app.load_resolved().await?;

    match app.write_output(&document).await? {
        Some(path) => {
            println!("Resolved document written to {}", path.display());
            println!(
                "Operations: {}, definitions: {}, references inlined: {}, unresolved: {}",
                document.operations.len(),
                document.definitions.len(),
                stats.inlined,
                stats.unresolved
            );
        }
        None => println!("{}", app.render(&document)?),
    }

    Ok(())
}
