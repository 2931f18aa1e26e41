//! `pinimg add` - Add one image to a catalog file.

use std::path::PathBuf;

use clap::Args;
use pinimg_source::ImageOptions;

/// Arguments for the `add` command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Catalog file to update; created if missing.
    #[arg(short, long, env = "PINIMG_CATALOG")]
    pub catalog: PathBuf,

    /// Image name (e.g. `quay.io/fedora/fedora`).
    #[arg(long)]
    pub name: String,

    /// Image digest (`sha256:<64 hex>`).
    #[arg(long)]
    pub digest: String,

    /// Reference key the entry is stored under (`sha256:<64 hex>`).
    #[arg(long, visible_alias = "id")]
    pub key: String,

    /// Verify TLS when fetching (unset = fetcher default).
    #[arg(long)]
    pub tls_verify: Option<bool>,

    /// Transport: `docker` or `containers-storage` (unset = fetcher default).
    #[arg(long)]
    pub transport: Option<String>,

    /// Storage location for the `containers-storage` transport.
    #[arg(long)]
    pub storage_location: Option<String>,
}

/// Executes the `add` command.
///
/// The catalog file is only rewritten if the entry is valid.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or written, or if the
/// entry breaks a catalog rule.
pub fn execute(args: &AddArgs) -> anyhow::Result<()> {
    tracing::info!(catalog = %args.catalog.display(), key = %args.key, "adding image");
    let mut catalog = crate::store::load_or_new(&args.catalog)?;
    let options = ImageOptions {
        tls_verify: args.tls_verify,
        transport: args.transport.clone(),
        storage_location: args.storage_location.clone(),
    };
    catalog.add_entry(&args.name, &args.digest, &args.key, &options)?;
    crate::output::write_json(Some(&args.catalog), &catalog)
}
