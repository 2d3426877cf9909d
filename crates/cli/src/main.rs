//! OpenAPI Importer CLI
//!
//! Thin presentation layer over the parser and diff crates: it reads files,
//! calls the pure core, and renders the results. It makes no decision about
//! persisting anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openapi_importer_common::{DiffResult, EndpointSnapshot, Spec};
use openapi_importer_diff::{diff, scheme_label};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "openapi-importer")]
#[command(version, about = "Parse OpenAPI 3.x specs and reconcile them against imported endpoints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a spec file and display the extracted API surface
    #[command(after_help = "EXAMPLES:\n  \
        # Parse a JSON spec\n  \
        openapi-importer parse --spec petstore.json\n\n  \
        # YAML works the same way\n  \
        openapi-importer parse --spec petstore.yaml")]
    Parse {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Diff a spec file against previously exported endpoint snapshots
    #[command(after_help = "EXAMPLES:\n  \
        # Compare an updated spec with a snapshot export\n  \
        openapi-importer diff --spec petstore.json --snapshots imported.json")]
    Diff {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Path to a JSON array of endpoint snapshots
        #[arg(long)]
        snapshots: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { spec } => {
            let parsed = parse_spec_file(&spec)?;
            print_spec(&parsed);
        }
        Commands::Diff { spec, snapshots } => {
            let parsed = parse_spec_file(&spec)?;
            let stored = load_snapshots(&snapshots)?;
            let result = diff(&parsed.endpoints, &stored, &parsed.security_schemes);
            print_diff(&result);
        }
    }

    Ok(())
}

fn parse_spec_file(path: &Path) -> Result<Spec> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read spec file {}", path.display()))?;
    openapi_importer_parser::parse(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_snapshots(path: &Path) -> Result<Vec<EndpointSnapshot>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshots in {}", path.display()))
}

fn print_spec(spec: &Spec) {
    println!(
        "{} {} ({})",
        "API:".bold(),
        spec.info.title.cyan(),
        spec.info.version
    );
    if let Some(ref description) = spec.info.description {
        println!("     {description}");
    }

    if !spec.servers.is_empty() {
        println!("\n{}", "Servers:".bold());
        for server in &spec.servers {
            match &server.description {
                Some(description) => println!("  {} - {description}", server.effective_url()),
                None => println!("  {}", server.effective_url()),
            }
        }
    }

    if !spec.security_schemes.is_empty() {
        println!("\n{}", "Security schemes:".bold());
        for scheme in &spec.security_schemes {
            println!("  {} ({})", scheme.name, scheme_label(&scheme.scheme_type));
        }
    }

    println!("\n{} {}", "Endpoints:".bold(), spec.endpoints.len());
    for endpoint in &spec.endpoints {
        let label = if endpoint.name.is_empty() {
            String::new()
        } else {
            format!("  ({})", endpoint.name)
        };
        println!(
            "  {:7} {}{label}",
            endpoint.method.as_str().green(),
            endpoint.path
        );
    }

    if spec.ref_skip_count > 0 {
        println!(
            "\n{} {} unresolved $ref parameter(s) were skipped",
            "warning:".yellow().bold(),
            spec.ref_skip_count
        );
    }
}

fn print_diff(result: &DiffResult) {
    println!(
        "{} {} new, {} changed, {} removed, {} unchanged",
        "Diff:".bold(),
        result.new_endpoints.len(),
        result.changed_endpoints.len(),
        result.removed_endpoints.len(),
        result.unchanged_endpoints.len()
    );

    for endpoint in &result.new_endpoints {
        println!("  {} {}", "+".green().bold(), endpoint.identity());
    }
    for change in &result.changed_endpoints {
        println!("  {} {}", "~".yellow().bold(), change.id);
    }
    for snapshot in &result.removed_endpoints {
        let note = if snapshot.request_id.is_none() {
            " (user-created)"
        } else {
            ""
        };
        println!("  {} {}{note}", "-".red().bold(), snapshot.id);
    }
    for snapshot in &result.unchanged_endpoints {
        println!("  {} {}", "=".dimmed(), snapshot.id);
    }

    if result.is_clean() {
        println!("\n{}", "Everything is up to date.".green());
    }
}
