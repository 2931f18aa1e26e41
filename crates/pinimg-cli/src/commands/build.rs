//! `pinimg build` - Build a catalog from a list of entry requests.

use std::path::PathBuf;

use clap::Args;
use pinimg_common::config::CatalogDefaults;
use pinimg_source::{Source, SourceCatalog};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// YAML or JSON list of entries (`name`, `digest`, `key` and optional hints).
    pub requests: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with defaults for unset `tls-verify`, `containers-transport`
    /// and `storage-location`.
    #[arg(long, env = "PINIMG_DEFAULTS")]
    pub defaults: Option<PathBuf>,

    /// Wrap the catalog under its manifest source name.
    #[arg(long)]
    pub wrap: bool,
}

/// Builds the catalog without writing it.
///
/// Every rejected entry is reported on stderr before failing, so one run
/// shows all the mistakes in the input.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or any entry is
/// rejected.
pub fn build_catalog(args: &BuildArgs) -> anyhow::Result<SourceCatalog> {
    let defaults = match &args.defaults {
        Some(path) => CatalogDefaults::load(path)?,
        None => CatalogDefaults::default(),
    };
    let requests = crate::store::load_requests(&args.requests)?;
    tracing::info!(
        path = %args.requests.display(),
        entries = requests.len(),
        defaults = !defaults.is_empty(),
        "building catalog"
    );

    let mut catalog = SourceCatalog::new();
    let report = catalog.add_all(requests.into_iter().map(|r| r.with_defaults(&defaults)));
    crate::output::report_rejections(&report.rejected)?;
    let _ = report.into_result()?;
    Ok(catalog)
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or written.
pub fn execute(args: &BuildArgs) -> anyhow::Result<()> {
    let catalog = build_catalog(args)?;
    let output = args.output.as_deref();
    if args.wrap {
        crate::output::write_json(output, &catalog.to_source_value()?)
    } else {
        crate::output::write_json(output, &catalog)
    }
}
