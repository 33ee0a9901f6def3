//! # Batch conversion of a directory of SNANA simulations
//!
//! The driver walks an input directory, converts every photometry file it recognizes
//! with [`read_fits`], and writes two CSV tables per batch into an output directory.
//!
//! Modules
//! -----------------
//! * [`naming`] – Discovery marker, paired header path and output file names.
//! * [`progress_bar`] – Per-batch timing (and an optional progress bar with `progress`).
//!
//! Resumability
//! -----------------
//! A batch whose header CSV already exists is skipped without reading its input. Re-running
//! the driver on a completed output directory therefore neither reads nor writes anything.
//!
//! Output format
//! -----------------
//! Each CSV starts with an unnamed column holding the row label of
//! the record (see [`crate::light_curves`]), followed by the canonical columns:
//!
//! ```text
//! ,object_id,true_target,true_peakmjd,true_z,true_z_err,mwebv
//! 0,1000,42,60010.5,0.12,0.003,0.025
//! ```
//!
//! Error Handling
//! -----------------
//! Empty batches are skipped. Any other failure (missing header file, unreadable table,
//! I/O error) aborts the whole run; files already written are left in place.
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use tracing::{debug, info};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

use crate::fits_io::read_fits;
use crate::light_curves::{ReadOptions, TableRecord};
use crate::snana_errors::SnanaError;

pub mod naming;
pub mod progress_bar;

use naming::{is_photometry_file, output_paths, OutputPaths};
use progress_bar::{fmt_dur, IterTimer};

/// What happened to one input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Converted {
        paths: OutputPaths,
        header_rows: usize,
        photometry_rows: usize,
    },
    /// The header CSV already existed; the input was not read.
    SkippedExisting,
    /// The photometry table (or the resulting header table) was empty.
    SkippedEmpty,
}

/// Counters of a directory conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped_existing: usize,
    pub skipped_empty: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &BatchOutcome) {
        match outcome {
            BatchOutcome::Converted { .. } => self.converted += 1,
            BatchOutcome::SkippedExisting => self.skipped_existing += 1,
            BatchOutcome::SkippedEmpty => self.skipped_empty += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.skipped_existing + self.skipped_empty
    }
}

/// Photometry files of `fits_dir`, sorted by name.
///
/// Only direct children whose name contains `PHOT.FITS` and ends in `.FITS` or
/// `.FITS.gz` are returned.
pub fn discover_photometry_files(fits_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SnanaError> {
    let mut found = Vec::new();
    for entry in fits_dir.read_dir_utf8()? {
        let entry = entry?;
        if is_photometry_file(entry.file_name()) {
            found.push(entry.into_path());
        } else {
            debug!(file = entry.file_name(), "ignored");
        }
    }
    Ok(found.into_iter().sorted().collect())
}

/// Write a canonical table as CSV, with a leading unnamed row-label column.
///
/// The header line is written even when `rows` is empty.
pub fn write_csv<T: TableRecord>(rows: &[T], path: &Utf8Path) -> Result<(), SnanaError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(std::iter::once("").chain(T::COLUMNS.iter().copied()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Convert one photometry file into its two CSV outputs.
///
/// Arguments
/// -----------------
/// * `phot_path` – A photometry file accepted by [`is_photometry_file`].
/// * `output_dir` – Existing directory receiving the CSV files.
///
/// Return
/// ----------
/// * The [`BatchOutcome`] of the batch. Nothing is written for skipped batches.
pub fn convert_batch(phot_path: &Utf8Path, output_dir: &Utf8Path) -> Result<BatchOutcome, SnanaError> {
    let paths = output_paths(phot_path, output_dir)?;
    if paths.header_csv.exists() {
        debug!(path = %paths.header_csv, "already converted");
        return Ok(BatchOutcome::SkippedExisting);
    }

    info!("writing to {}", paths.header_csv);
    let (header, photometry) = read_fits(phot_path, &ReadOptions::default())?;
    if header.is_empty() {
        return Ok(BatchOutcome::SkippedEmpty);
    }

    write_csv(&header, &paths.header_csv)?;
    write_csv(&photometry, &paths.photometry_csv)?;

    Ok(BatchOutcome::Converted {
        paths,
        header_rows: header.len(),
        photometry_rows: photometry.len(),
    })
}

/// Convert every SNANA batch of `fits_dir` into CSV files in `output_dir`.
///
/// `output_dir` is created (with its parents) if needed. Batches are processed
/// sequentially in file name order.
///
/// Return
/// ----------
/// * A [`BatchSummary`] counting converted and skipped batches.
///
/// See also
/// ------------
/// * [`convert_batch`] – Per-file conversion and skip rules.
pub fn convert_directory(
    fits_dir: &Utf8Path,
    output_dir: &Utf8Path,
) -> Result<BatchSummary, SnanaError> {
    let phot_paths = discover_photometry_files(fits_dir)?;
    std::fs::create_dir_all(output_dir)?;
    info!(
        batches = phot_paths.len(),
        "converting {} into {}", fits_dir, output_dir
    );

    #[cfg(feature = "progress")]
    let pb = {
        let pb = ProgressBar::new(phot_paths.len().max(1) as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | ETA {eta_precise} | {msg}",
            )
            .expect("indicatif template"),
        );
        pb.enable_steady_tick(Duration::from_millis(200));
        pb
    };

    let mut summary = BatchSummary::default();
    let mut it_timer = IterTimer::new(0.2);

    for phot_path in &phot_paths {
        it_timer.reset();
        let outcome = convert_batch(phot_path, output_dir)?;

        if let BatchOutcome::Converted {
            header_rows,
            photometry_rows,
            ..
        } = &outcome
        {
            let last = it_timer.tick();
            info!(
                header_rows,
                photometry_rows,
                "converted {} in {} (avg {})",
                phot_path,
                fmt_dur(last),
                fmt_dur(it_timer.avg())
            );
            #[cfg(feature = "progress")]
            pb.set_message(format!("last: {}, avg: {}", fmt_dur(last), fmt_dur(it_timer.avg())));
        }
        summary.record(&outcome);

        #[cfg(feature = "progress")]
        pb.inc(1);
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    info!(
        converted = summary.converted,
        skipped_existing = summary.skipped_existing,
        skipped_empty = summary.skipped_empty,
        "done"
    );
    Ok(summary)
}
