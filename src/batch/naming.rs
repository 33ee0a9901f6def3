//! File naming convention of SNANA batches.
//!
//! A batch `<batch>` is stored as `<batch>_PHOT.FITS[.gz]` and `<batch>_HEAD.FITS[.gz]`.
//! Only photometry files are discovered; the header file and both CSV outputs are
//! derived from the photometry file name:
//!
//! | input                    | header input             | header CSV        | photometry CSV    |
//! |--------------------------|--------------------------|-------------------|-------------------|
//! | `SIM_0001_PHOT.FITS.gz`  | `SIM_0001_HEAD.FITS.gz`  | `SIM_0001_HEAD.csv` | `SIM_0001_PHOT.csv` |
//!
//! The `PHOT` tag substituted is the last one of the file name; directory components are
//! never rewritten.
use camino::{Utf8Path, Utf8PathBuf};

use crate::constants::{CSV_EXTENSION, FITS_EXTENSIONS, HEAD_TAG, PHOT_FILE_MARKER, PHOT_TAG};
use crate::snana_errors::SnanaError;

/// Output files of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header_csv: Utf8PathBuf,
    pub photometry_csv: Utf8PathBuf,
}

/// Whether a file name designates a photometry table this crate can convert.
pub fn is_photometry_file(file_name: &str) -> bool {
    file_name.contains(PHOT_FILE_MARKER) && strip_fits_extension(file_name).is_some()
}

/// File name without its `.FITS` / `.FITS.gz` extension.
fn strip_fits_extension(file_name: &str) -> Option<&str> {
    FITS_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(*ext))
}

/// Replace the last [`PHOT_TAG`] of `name` with [`HEAD_TAG`].
fn phot_to_head(name: &str) -> Option<String> {
    let at = name.rfind(PHOT_TAG)?;
    Some(format!(
        "{}{}{}",
        &name[..at],
        HEAD_TAG,
        &name[at + PHOT_TAG.len()..]
    ))
}

fn photometry_file_name(phot_path: &Utf8Path) -> Result<&str, SnanaError> {
    phot_path
        .file_name()
        .filter(|name| is_photometry_file(name))
        .ok_or_else(|| SnanaError::NotAPhotometryFile(phot_path.to_owned()))
}

/// Path of the header table paired with a photometry table.
pub fn header_path_for(phot_path: &Utf8Path) -> Result<Utf8PathBuf, SnanaError> {
    let name = photometry_file_name(phot_path)?;
    let head_name =
        phot_to_head(name).ok_or_else(|| SnanaError::NotAPhotometryFile(phot_path.to_owned()))?;
    Ok(phot_path.with_file_name(head_name))
}

/// CSV outputs of the batch of `phot_path`, placed in `output_dir`.
pub fn output_paths(phot_path: &Utf8Path, output_dir: &Utf8Path) -> Result<OutputPaths, SnanaError> {
    let name = photometry_file_name(phot_path)?;
    let stem = strip_fits_extension(name)
        .ok_or_else(|| SnanaError::NotAPhotometryFile(phot_path.to_owned()))?;
    let head_stem =
        phot_to_head(stem).ok_or_else(|| SnanaError::NotAPhotometryFile(phot_path.to_owned()))?;

    Ok(OutputPaths {
        header_csv: output_dir.join(format!("{head_stem}{CSV_EXTENSION}")),
        photometry_csv: output_dir.join(format!("{stem}{CSV_EXTENSION}")),
    })
}
