//! Convert a directory of SNANA simulation batches into CSV tables.
//!
//! For every `<batch>_PHOT.FITS[.gz]` of `--fits_dir`, writes `<batch>_HEAD.csv` and
//! `<batch>_PHOT.csv` into `--output_dir`. Batches already converted are skipped.
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;

use snana2csv::{convert_directory, SnanaError};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert SNANA light-curve FITS batches into CSV tables"
)]
struct Args {
    #[arg(
        long = "fits_dir",
        help = "Directory holding the *_PHOT.FITS[.gz] and *_HEAD.FITS[.gz] files"
    )]
    fits_dir: Utf8PathBuf,

    #[arg(
        long = "output_dir",
        help = "Directory receiving the *_HEAD.csv and *_PHOT.csv files (created if absent)"
    )]
    output_dir: Utf8PathBuf,
}

fn main() -> Result<(), SnanaError> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let summary = convert_directory(&args.fits_dir, &args.output_dir)?;
    info!(
        "{} batches: {} converted, {} already present, {} empty",
        summary.total(),
        summary.converted,
        summary.skipped_existing,
        summary.skipped_empty
    );

    Ok(())
}
