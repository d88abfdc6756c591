//! Inspect command implementation

use crate::cli::utils;
use crate::{Document, Property};
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::fmt::Write;

pub fn command() -> Command {
    utils::with_source_args(
        Command::new("inspect").about("Print a summary of operations and definitions"),
    )
    .arg(
        clap::Arg::new("no-resolve")
            .long("no-resolve")
            .help("Skip reference resolution")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;

    let document = if matches.get_flag("no-resolve") {
        app.load().await?
    } else {
        app.load_resolved().await?.0
    };

    print!("{}", summarize(&document));
    Ok(())
}

/// Render a plain-text summary of a document
pub fn summarize(document: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Swagger {}", document.version);
    if let Some(host) = &document.host {
        let _ = writeln!(
            out,
            "Host: {}{}",
            host,
            document.base_path.as_deref().unwrap_or("")
        );
    }

    let _ = writeln!(out, "\nOperations ({}):", document.operations.len());
    for operation in &document.operations {
        let _ = writeln!(
            out,
            "  {} {} [{}]",
            operation.method.to_uppercase(),
            operation.url,
            operation.operation_id.as_deref().unwrap_or("-")
        );
        if !operation.tags.is_empty() {
            let _ = writeln!(out, "    tags: {}", operation.tags.join(", "));
        }
        for parameter in &operation.parameters {
            let schema = parameter
                .schema
                .as_ref()
                .map(|s| {
                    s.reference
                        .clone()
                        .unwrap_or_else(|| s.schema_type.clone())
                })
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "    - {} ({}) {}",
                parameter.name,
                parameter
                    .location
                    .map(|l| format!("{l:?}").to_lowercase())
                    .unwrap_or_else(|| "-".to_string()),
                schema
            );
        }
    }

    let _ = writeln!(out, "\nDefinitions ({}):", document.definitions.len());
    for definition in &document.definitions {
        let display = definition
            .display_name
            .as_deref()
            .map(|name| format!(" (xml: {name})"))
            .unwrap_or_default();
        let _ = writeln!(out, "  {}{}", definition.registry_key, display);
        for property in &definition.properties {
            write_property(&mut out, property, 2);
        }
    }

    out
}

fn write_property(out: &mut String, property: &Property, depth: usize) {
    let indent = "  ".repeat(depth);
    let kind = match (&property.reference, property.property_type.is_empty()) {
        (Some(reference), true) => reference.clone(),
        (Some(reference), false) => format!("{} -> {}", property.property_type, reference),
        (None, _) => property.property_type.clone(),
    };
    let _ = writeln!(out, "{indent}{}: {kind}", property.name);
    for nested in &property.properties {
        write_property(out, nested, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_document, resolve_all_references};

    #[test]
    fn test_summary_lists_inlined_fields() {
        let document = parse_document(
            r##"{
                "swagger": "2.0",
                "host": "petstore.swagger.io",
                "basePath": "/v2",
                "paths": {"/pet": {"post": {"operationId": "addPet", "parameters": [
                    {"name": "body", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}
                ]}}},
                "definitions": {
                    "Category": {"properties": {"id": {"type": "integer"}}},
                    "Pet": {"properties": {"category": {"$ref": "#/definitions/Category"}}}
                }
            }"##,
        )
        .unwrap();
        let document = resolve_all_references(document).unwrap();

        let summary = summarize(&document);
        assert!(summary.contains("Host: petstore.swagger.io/v2"));
        assert!(summary.contains("POST /pet [addPet]"));
        assert!(summary.contains("- body (body) #/definitions/Pet"));
        assert!(summary.contains("    category: #/definitions/Category\n      id: integer\n"));
    }
}
