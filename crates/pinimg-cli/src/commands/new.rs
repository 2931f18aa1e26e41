//! `pinimg new` - Write an empty catalog.

use std::path::PathBuf;

use clap::Args;
use pinimg_source::SourceCatalog;

/// Arguments for the `new` command.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Write the catalog to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `new` command.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn execute(args: &NewArgs) -> anyhow::Result<()> {
    crate::output::write_json(args.output.as_deref(), &SourceCatalog::new())
}
