use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use tilemap_relink::logging::{init_logging, level_for};
use tilemap_relink::{
    AssetIndexBuilder, CollectionRoot, CollectionSettings, MapDocument, PlatformLocator,
    locate_settings, patch_document,
};

/// Repair moved tile image references in a hex map and print the fixed map on stdout.
#[derive(Debug, Parser)]
#[command(name = "tilemap-relink", version, about)]
struct Cli {
    /// Treat every path before the map as a collection root, named after its directory.
    ///
    /// Implied when more than one path precedes the map.
    #[arg(long)]
    roots: bool,

    /// Settings file to read instead of the per-platform location.
    #[arg(long, value_name = "FILE", conflicts_with = "roots")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report fatal errors.
    #[arg(short, long)]
    quiet: bool,

    /// `<INSTALLATION> <MAP>`, or `<COLLECTION>... <MAP>`.
    #[arg(required = true, num_args = 2.., value_name = "PATH")]
    paths: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose, cli.quiet));

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some((map_path, inputs)) = cli.paths.split_last() else {
        bail!("missing map path");
    };

    let explicit_roots = cli.roots || (inputs.len() > 1 && cli.settings.is_none());
    let roots = if explicit_roots {
        inputs
            .iter()
            .map(CollectionRoot::from_dir)
            .collect::<tilemap_relink::Result<Vec<_>>>()?
    } else {
        let [installation] = inputs else {
            bail!("expected <INSTALLATION> <MAP> with --settings");
        };
        settings_roots(installation, cli.settings.as_deref())?
    };

    let builder = AssetIndexBuilder::new().with_roots(roots);
    if builder.roots().is_empty() {
        warn!("no collections to scan; every referenced tile will be unknown");
    }
    let index = builder.build().context("unable to index collections")?;

    let mut document = MapDocument::load(map_path).context("unable to read map file")?;
    let report = patch_document(&mut document, &index).context("map format error")?;
    info!(map = %map_path.display(), "{report}");

    let output = document.to_json()?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("unable to write the repaired map")?;
    Ok(())
}

fn settings_roots(installation: &Path, settings: Option<&Path>) -> Result<Vec<CollectionRoot>> {
    let settings_path = match settings {
        Some(path) => path.to_path_buf(),
        None => locate_settings(&PlatformLocator::current())
            .context("unable to read user settings")?,
    };
    let settings = CollectionSettings::load(&settings_path)
        .context("unable to read the list of collections")?;
    Ok(settings.collection_roots(installation))
}
