//! CLI command definitions and dispatch.

pub mod add;
pub mod build;
pub mod digest;
pub mod new;
pub mod validate;

use clap::{Parser, Subcommand};

/// pinimg - Digest-pinned container image source catalogs.
#[derive(Parser, Debug)]
#[command(name = pinimg_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write an empty catalog.
    New(new::NewArgs),
    /// Add one image to a catalog file.
    Add(add::AddArgs),
    /// Check a catalog file against every catalog rule.
    Validate(validate::ValidateArgs),
    /// Build a catalog from a YAML or JSON list of entries.
    Build(build::BuildArgs),
    /// Print the sha256 digest of a file.
    Digest(digest::DigestArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::New(args) => new::execute(&args),
        Command::Add(args) => add::execute(&args),
        Command::Validate(args) => validate::execute(&args),
        Command::Build(args) => build::execute(&args),
        Command::Digest(args) => digest::execute(&args),
    }
}
