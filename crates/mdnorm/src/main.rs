//! mdnorm CLI - Markdown formatter and structural checker.
//!
//! Provides commands for:
//! - `fmt`: Rewrite Markdown into canonical form
//! - `vet`: Report structural faults found in the raw bytes
//! - `ast`: Dump the parsed node tree as JSON

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AstArgs, FmtArgs, Status, VetArgs};
use output::Output;

/// Exit status when `vet` finds faults.
const FAULTS_EXIT_CODE: i32 = 2;

/// mdnorm - Markdown formatter and structural checker.
#[derive(Parser)]
#[command(name = "mdnorm", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format Markdown into canonical form.
    Fmt(FmtArgs),
    /// Check Markdown for structural faults.
    ///
    /// Faults are reported as `file:row:column`. Rows and columns are
    /// 1-based; the column counts bytes from the start of the line, plus one.
    Vet(VetArgs),
    /// Print the parsed node tree as JSON.
    Ast(AstArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr so formatted output on stdout stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Fmt(args) => args.execute(),
        Commands::Vet(args) => args.execute(),
        Commands::Ast(args) => args.execute(),
    };

    match result {
        Ok(Status::Clean) => {}
        Ok(Status::Faults) => std::process::exit(FAULTS_EXIT_CODE),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_vet_help_documents_one_based_columns() {
        let mut cli = Cli::command();
        let vet = cli.find_subcommand_mut("vet").unwrap();
        let help = vet.render_long_help().to_string();
        assert!(help.contains("1-based"), "{help}");
    }
}
