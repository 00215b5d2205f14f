//! kmz-enricher: rewrite a KMZ's parcels with synthetic registry data
//!
//! ## Usage
//!
//! ```bash
//! # Update ./13.kmz with default settings
//! kmz-enricher
//!
//! # Another archive, reproducible output
//! kmz-enricher parcels.kmz --seed 42
//!
//! # Labels and fallbacks from a config file
//! kmz-enricher --config kmz-enricher.toml
//! ```
//!
//! Exit codes: 0 on success, 2 when the archive itself is unusable (no KML
//! member, malformed KML, no Placemarks), 1 for any other failure.

use clap::Parser;
use kmz_enricher::{Config, EnrichError, Enricher};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kmz-enricher")]
#[command(about = "Fill KMZ parcels with synthetic cadastral registry data")]
struct Cli {
    /// KMZ archive to update (overrides config file)
    archive: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "KMZ_ENRICHER_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for reproducible output (overrides config file)
    #[arg(long, env = "KMZ_ENRICHER_SEED")]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("kmz_enricher=info".parse().expect("static directive")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let fatal_input = e
                .downcast_ref::<EnrichError>()
                .is_some_and(EnrichError::is_fatal_input);
            if fatal_input {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(archive) = cli.archive {
        config.archive_path = archive;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let archive_path = config.archive_path.clone();
    println!("Updating {}...", archive_path.display());

    let mut enricher = Enricher::new(config);
    let summary = enricher.run_with(
        &mut kmz_enricher::ZipContainer::new(&archive_path),
        &archive_path,
        |records| println!("Found {} parcels.", records),
    )?;

    if summary.written {
        println!("✅ {} updated ({}).", archive_path.display(), summary.member_name);
    } else {
        println!("Nothing to update, {} left unchanged.", archive_path.display());
    }
    println!("✅ {} parcels updated.", summary.records);

    Ok(())
}
