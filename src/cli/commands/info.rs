//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("SwaggerResolve - Swagger (OpenAPI v2) reference inliner");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));

    if detailed {
        println!("\nDetailed Information:");
        println!("  - JSON and YAML Swagger 2.0 documents");
        println!("  - Paths flattened into one operation per url and verb");
        println!("  - $ref targets inlined by definition name, recursively");
        println!("  - Cyclic references reported instead of recursing forever");
        println!(
            "  - Remote documents: {}",
            if cfg!(feature = "http") {
                "enabled"
            } else {
                "disabled (build with --features http)"
            }
        );
    }

    Ok(())
}
