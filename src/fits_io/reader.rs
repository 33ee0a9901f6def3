//! # Reader for SNANA simulation batches
//!
//! Loads the photometry table of a batch together with its paired header table and
//! hands both to [`normalize_batch`](crate::light_curves::normalize_batch).
//!
//! ## Expected FITS schema
//! -----------------
//! Photometry (`*_PHOT.FITS[.gz]`, HDU 1):
//! - `MJD` — observation epoch, separator rows hold `-777.0`;
//! - `FLT` or `BAND` — fixed-width filter code (`FLT` is preferred when both exist);
//! - `FLUXCAL`, `FLUXCALERR` — calibrated flux and its 1-σ error.
//!
//! Header (`*_HEAD.FITS[.gz]`, HDU 1):
//! - `SNID` — object identifier, integer or string, coerced to `i32`;
//! - `SNTYPE`, `PEAKMJD`, `REDSHIFT_FINAL`, `REDSHIFT_FINAL_ERR`, `MWEBV`.
//!
//! Other columns are ignored.
//!
//! ## Error Handling
//! -----------------
//! - An empty photometry table is not an error: two empty tables are returned and the
//!   header file is not opened.
//! - A missing header file yields [`SnanaError::MissingHeaderFile`].
//! - Missing columns, unreadable files and block/header count mismatches are propagated.
use camino::Utf8Path;
use tracing::{info_span, warn};

use crate::batch::naming::header_path_for;
use crate::constants::{
    COL_BAND_ALTERNATIVES, COL_FLUXCAL, COL_FLUXCALERR, COL_MJD, COL_MWEBV, COL_PEAKMJD,
    COL_REDSHIFT_FINAL, COL_REDSHIFT_FINAL_ERR, COL_SNID, COL_SNTYPE,
};
use crate::fits_io::raw_table::RawTable;
use crate::light_curves::{
    normalize_batch, HeaderTable, PhotometryTable, RawHeader, RawPhotometry, ReadOptions,
};
use crate::snana_errors::SnanaError;

/// Load and normalize one SNANA batch.
///
/// The header file is located from the photometry path by the naming convention of
/// [`header_path_for`].
///
/// Arguments
/// -----------------
/// * `phot_path` – Path to a `*PHOT.FITS` or `*PHOT.FITS.gz` file.
/// * `options` – Normalization options, see [`ReadOptions`].
///
/// Return
/// ----------
/// * `(header, photometry)` canonical tables, in input row order. Both are empty when
///   the photometry file holds no row.
pub fn read_fits(
    phot_path: &Utf8Path,
    options: &ReadOptions,
) -> Result<(HeaderTable, PhotometryTable), SnanaError> {
    let head_path = header_path_for(phot_path)?;
    read_fits_pair(phot_path, &head_path, options)
}

/// Same as [`read_fits`] with an explicit header path.
pub fn read_fits_pair(
    phot_path: &Utf8Path,
    head_path: &Utf8Path,
    options: &ReadOptions,
) -> Result<(HeaderTable, PhotometryTable), SnanaError> {
    let _span = info_span!("read_fits", path = %phot_path).entered();

    let photometry = read_raw_photometry(phot_path)?;
    if photometry.is_empty() {
        warn!("empty");
        return Ok((Vec::new(), Vec::new()));
    }

    if !head_path.is_file() {
        return Err(SnanaError::MissingHeaderFile(head_path.to_owned()));
    }
    let header = read_raw_header(head_path)?;

    let batch = normalize_batch(&header, &photometry, options)?;
    Ok((batch.header, batch.photometry))
}

pub(crate) fn read_raw_photometry(path: &Utf8Path) -> Result<RawPhotometry, SnanaError> {
    let mut table = RawTable::open(path)?;
    if table.num_rows() == 0 {
        return Ok(RawPhotometry::default());
    }

    let band_column = table.first_present(&COL_BAND_ALTERNATIVES)?;
    Ok(RawPhotometry {
        mjd: table.read(COL_MJD)?,
        band: table.read(band_column)?,
        fluxcal: table.read(COL_FLUXCAL)?,
        fluxcalerr: table.read(COL_FLUXCALERR)?,
    })
}

pub(crate) fn read_raw_header(path: &Utf8Path) -> Result<RawHeader, SnanaError> {
    let mut table = RawTable::open(path)?;
    if table.num_rows() == 0 {
        return Ok(RawHeader::default());
    }

    Ok(RawHeader {
        snid: table.read_object_ids(COL_SNID)?,
        sntype: table.read(COL_SNTYPE)?,
        peakmjd: table.read(COL_PEAKMJD)?,
        redshift_final: table.read(COL_REDSHIFT_FINAL)?,
        redshift_final_err: table.read(COL_REDSHIFT_FINAL_ERR)?,
        mwebv: table.read(COL_MWEBV)?,
    })
}
