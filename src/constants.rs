//! # Constants and type definitions for snana2csv
//!
//! This module centralizes the **fixed vocabularies** and **common type definitions**
//! used throughout the crate: the SNANA sentinel value separating light curves, the
//! file-name markers of a simulation batch, and the two lookup tables applied during
//! normalization.
//!
//! ## Overview
//!
//! - Sentinel value of the raw photometry stream
//! - File-name markers of SNANA batches
//! - Class-collapsing table for `true_target`
//! - Passband vocabulary (`u g r i z Y` → `0..=5`)
//! - Core type aliases
//!
//! The tables are plain constant slices so they can be inspected and tested
//! independently of any file I/O.

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Modified Julian Date, in days
pub type MJD = f64;

/// Identifier of a simulated object (`SNID` in SNANA files)
pub type ObjectId = i32;

/// Integer class label of a simulated object (`SNTYPE` in SNANA files)
pub type ClassCode = i32;

/// Integer passband code in `0..=5`
pub type PassbandCode = u8;

// -------------------------------------------------------------------------------------------------
// Raw stream conventions
// -------------------------------------------------------------------------------------------------

/// Timestamp carried by separator rows of the raw photometry stream.
pub const SENTINEL_MJD: MJD = -777.0;

/// Marker identifying photometry files during discovery.
pub const PHOT_FILE_MARKER: &str = "PHOT.FITS";

/// Substring distinguishing photometry file names from header file names.
pub const PHOT_TAG: &str = "PHOT";

/// Substring replacing [`PHOT_TAG`] to locate the paired header file.
pub const HEAD_TAG: &str = "HEAD";

/// Recognized extensions of SNANA binary tables, longest first.
pub const FITS_EXTENSIONS: [&str; 2] = [".FITS.gz", ".FITS"];

/// Extension of every produced table.
pub const CSV_EXTENSION: &str = ".csv";

// -------------------------------------------------------------------------------------------------
// Normalization tables
// -------------------------------------------------------------------------------------------------

/// Collapse near-duplicate SNANA subclass codes into canonical classes.
///
/// Each entry is `(raw code, canonical code)`. Codes absent from the table are
/// kept as they are, so canonical codes map onto themselves.
pub const CLASS_COLLAPSE: [(ClassCode, ClassCode); 20] = [
    (120, 42),
    (20, 42),
    (121, 42),
    (21, 42),
    (122, 42),
    (22, 42),
    (130, 62),
    (30, 62),
    (131, 62),
    (31, 62),
    (101, 90),
    (1, 90),
    (102, 52),
    (2, 52),
    (104, 64),
    (4, 64),
    (103, 95),
    (3, 95),
    (191, 67),
    (91, 67),
];

/// Canonical class codes produced by [`CLASS_COLLAPSE`].
pub const CANONICAL_CLASSES: [ClassCode; 7] = [42, 62, 90, 52, 64, 95, 67];

/// Passband vocabulary: filter letter (without padding) → integer code.
pub const PASSBAND_CODES: [(&str, PassbandCode); 6] = [
    ("u", 0),
    ("g", 1),
    ("r", 2),
    ("i", 3),
    ("z", 4),
    ("Y", 5),
];

// -------------------------------------------------------------------------------------------------
// SNANA column names
// -------------------------------------------------------------------------------------------------

/// Object identifier column, present in both tables.
pub const COL_SNID: &str = "SNID";

/// Photometry timestamp column.
pub const COL_MJD: &str = "MJD";

/// Filter column names used by successive SNANA versions, in order of preference.
pub const COL_BAND_ALTERNATIVES: [&str; 2] = ["FLT", "BAND"];

pub const COL_FLUXCAL: &str = "FLUXCAL";
pub const COL_FLUXCALERR: &str = "FLUXCALERR";

pub const COL_SNTYPE: &str = "SNTYPE";
pub const COL_PEAKMJD: &str = "PEAKMJD";
pub const COL_REDSHIFT_FINAL: &str = "REDSHIFT_FINAL";
pub const COL_REDSHIFT_FINAL_ERR: &str = "REDSHIFT_FINAL_ERR";
pub const COL_MWEBV: &str = "MWEBV";
