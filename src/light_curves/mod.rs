//! # Light curves: canonical tables and batch normalization
//!
//! A SNANA simulation batch is made of two raw tables:
//!
//! * the **photometry** stream, every observation of every object concatenated and
//!   separated by sentinel rows (see [`segmentation`]);
//! * the **header** table, one row of static metadata per simulated object.
//!
//! This module defines the raw column sets loaded from disk ([`RawPhotometry`],
//! [`RawHeader`]), the canonical records produced for downstream pipelines
//! ([`PhotometryRecord`], [`HeaderRecord`]) and [`normalize_batch`], the pure
//! routine turning the former into the latter.
//!
//! Normalization
//! -----------------
//! 1. Trim stray sentinels at both ends of the photometry stream.
//! 2. Label each photometry row with the `SNID` of its block.
//! 3. Optionally drop the remaining separator rows ([`ReadOptions::drop_separators`]).
//! 4. Collapse `SNTYPE` subclasses into canonical classes.
//! 5. Code passbands as integers, excluding rows outside the vocabulary.
//!
//! Row labels
//! -----------------
//! Every record carries an `index`: its position in the raw table it comes from. It is
//! written as the leading unnamed column of the CSV outputs, so photometry rows removed
//! by trimming or filtering leave gaps in the sequence.
use itertools::Itertools;
use serde::Serialize;
use tracing::warn;

use crate::constants::{ClassCode, ObjectId, PassbandCode, MJD};
use crate::snana_errors::SnanaError;

pub mod segmentation;
pub mod vocabulary;

use segmentation::{assign_object_ids, is_sentinel, trim_sentinels};
use vocabulary::{collapse_class, passband_code};

pub type HeaderTable = Vec<HeaderRecord>;
pub type PhotometryTable = Vec<PhotometryRecord>;

/// A canonical record type with a fixed, ordered column set.
pub trait TableRecord: Serialize {
    /// Column names in output order, excluding the row label.
    const COLUMNS: &'static [&'static str];
}

/// Per-object metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderRecord {
    #[serde(rename = "")]
    pub index: usize,
    pub object_id: ObjectId,
    pub true_target: ClassCode,
    pub true_peakmjd: f32,
    pub true_z: f32,
    pub true_z_err: f32,
    pub mwebv: f32,
}

impl TableRecord for HeaderRecord {
    const COLUMNS: &'static [&'static str] = &[
        "object_id",
        "true_target",
        "true_peakmjd",
        "true_z",
        "true_z_err",
        "mwebv",
    ];
}

/// One flux measurement of one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotometryRecord {
    #[serde(rename = "")]
    pub index: usize,
    pub object_id: ObjectId,
    pub mjd: MJD,
    pub passband: PassbandCode,
    pub flux: f32,
    pub flux_err: f32,
}

impl TableRecord for PhotometryRecord {
    const COLUMNS: &'static [&'static str] = &["object_id", "mjd", "passband", "flux", "flux_err"];
}

/// Columns of a raw SNANA photometry table, one entry per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPhotometry {
    pub mjd: Vec<MJD>,
    /// Fixed-width filter codes (`FLT` or `BAND` column).
    pub band: Vec<String>,
    pub fluxcal: Vec<f32>,
    pub fluxcalerr: Vec<f32>,
}

impl RawPhotometry {
    pub fn len(&self) -> usize {
        self.mjd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mjd.is_empty()
    }
}

/// Columns of a raw SNANA header table, one entry per simulated object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHeader {
    pub snid: Vec<ObjectId>,
    pub sntype: Vec<ClassCode>,
    pub peakmjd: Vec<f32>,
    pub redshift_final: Vec<f32>,
    pub redshift_final_err: Vec<f32>,
    pub mwebv: Vec<f32>,
}

impl RawHeader {
    pub fn len(&self) -> usize {
        self.snid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snid.is_empty()
    }
}

/// Options of the photometry/header join.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Drop separator rows explicitly once object identifiers are assigned.
    ///
    /// When `false`, separators are still excluded by the passband filter since
    /// their filter field is outside the vocabulary.
    pub drop_separators: bool,
}

/// Result of [`normalize_batch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub header: HeaderTable,
    pub photometry: PhotometryTable,
    /// Raw positions of the rows excluded for an unexpected passband.
    pub rejected_rows: Vec<usize>,
}

/// Join a raw photometry stream with its header table into canonical tables.
///
/// Arguments
/// -----------------
/// * `header` – Raw header columns; one row per block of the photometry stream.
/// * `photometry` – Raw photometry columns, sentinel rows included.
/// * `options` – See [`ReadOptions`].
///
/// Return
/// ----------
/// * The canonical header and photometry tables in input order, and the raw
///   positions of the photometry rows excluded by the passband filter.
///
/// Errors
/// ----------
/// * [`SnanaError::SegmentCountMismatch`] if the number of sentinel-delimited blocks
///   differs from the number of header rows.
///
/// See also
/// ------------
/// * [`segmentation::assign_object_ids`] – Block labelling.
/// * [`vocabulary::collapse_class`], [`vocabulary::passband_code`] – Fixed lookups.
pub fn normalize_batch(
    header: &RawHeader,
    photometry: &RawPhotometry,
    options: &ReadOptions,
) -> Result<NormalizedBatch, SnanaError> {
    let kept = trim_sentinels(&photometry.mjd);
    let object_ids = assign_object_ids(&photometry.mjd[kept.clone()], &header.snid)?;

    let header_table = (0..header.len())
        .map(|i| HeaderRecord {
            index: i,
            object_id: header.snid[i],
            true_target: collapse_class(header.sntype[i]),
            true_peakmjd: header.peakmjd[i],
            true_z: header.redshift_final[i],
            true_z_err: header.redshift_final_err[i],
            mwebv: header.mwebv[i],
        })
        .collect();

    let mut photometry_table = Vec::with_capacity(kept.len());
    let mut rejected_rows = Vec::new();
    for (row, object_id) in kept.zip(object_ids) {
        let mjd = photometry.mjd[row];
        if options.drop_separators && is_sentinel(mjd) {
            continue;
        }

        let band = &photometry.band[row];
        match passband_code(band) {
            Some(passband) => photometry_table.push(PhotometryRecord {
                index: row,
                object_id,
                mjd,
                passband,
                flux: photometry.fluxcal[row],
                flux_err: photometry.fluxcalerr[row],
            }),
            None => rejected_rows.push(row),
        }
    }

    if !rejected_rows.is_empty() {
        let contents = rejected_rows
            .iter()
            .map(|&row| {
                format!(
                    "{row}: mjd={} band={:?}",
                    photometry.mjd[row], photometry.band[row]
                )
            })
            .join(", ");
        warn!(
            count = rejected_rows.len(),
            "num rows with unexpected passband: {} [{}]",
            rejected_rows.len(),
            contents
        );
    }

    Ok(NormalizedBatch {
        header: header_table,
        photometry: photometry_table,
        rejected_rows,
    })
}

#[cfg(test)]
mod light_curves_test {
    use super::*;
    use crate::constants::SENTINEL_MJD;

    const S: MJD = SENTINEL_MJD;

    fn raw_photometry(rows: &[(MJD, &str)]) -> RawPhotometry {
        RawPhotometry {
            mjd: rows.iter().map(|(t, _)| *t).collect(),
            band: rows.iter().map(|(_, b)| b.to_string()).collect(),
            fluxcal: (0..rows.len()).map(|i| i as f32 * 10.0).collect(),
            fluxcalerr: (0..rows.len()).map(|i| i as f32).collect(),
        }
    }

    fn raw_header(snid: &[ObjectId], sntype: &[ClassCode]) -> RawHeader {
        let n = snid.len();
        RawHeader {
            snid: snid.to_vec(),
            sntype: sntype.to_vec(),
            peakmjd: vec![60000.5; n],
            redshift_final: vec![0.1; n],
            redshift_final_err: vec![0.01; n],
            mwebv: vec![0.02; n],
        }
    }

    #[test]
    fn test_two_objects_scenario() {
        let phot = raw_photometry(&[
            (S, "- "),
            (100.0, "u "),
            (101.0, "g "),
            (S, "- "),
            (102.0, "r "),
        ]);
        let head = raw_header(&[11, 22], &[1, 42]);

        let batch = normalize_batch(&head, &phot, &ReadOptions::default()).unwrap();

        let ids: Vec<_> = batch.photometry.iter().map(|r| r.object_id).collect();
        let mjd: Vec<_> = batch.photometry.iter().map(|r| r.mjd).collect();
        let passbands: Vec<_> = batch.photometry.iter().map(|r| r.passband).collect();
        let index: Vec<_> = batch.photometry.iter().map(|r| r.index).collect();
        assert_eq!(ids, vec![11, 11, 22]);
        assert_eq!(mjd, vec![100.0, 101.0, 102.0]);
        assert_eq!(passbands, vec![0, 1, 2]);
        assert_eq!(index, vec![1, 2, 4]);

        // The interior separator is filtered out by its band code.
        assert_eq!(batch.rejected_rows, vec![3]);

        assert_eq!(batch.header.len(), 2);
        assert_eq!(batch.header[0].object_id, 11);
        assert_eq!(batch.header[0].true_target, 90);
        assert_eq!(batch.header[1].true_target, 42);
    }

    #[test]
    fn test_drop_separators_before_band_filter() {
        let phot = raw_photometry(&[(100.0, "u "), (S, "- "), (102.0, "X "), (103.0, "Y ")]);
        let head = raw_header(&[5, 6], &[20, 30]);
        let options = ReadOptions {
            drop_separators: true,
        };

        let batch = normalize_batch(&head, &phot, &options).unwrap();

        assert_eq!(batch.photometry.len(), 2);
        assert_eq!(batch.photometry[1].object_id, 6);
        assert_eq!(batch.photometry[1].passband, 5);
        // Only the genuinely unknown band is reported.
        assert_eq!(batch.rejected_rows, vec![2]);
    }

    #[test]
    fn test_unknown_band_rows_are_dropped() {
        let phot = raw_photometry(&[
            (100.0, "u "),
            (101.0, "X "),
            (102.0, "z "),
            (103.0, "X "),
            (S, "- "),
        ]);
        let head = raw_header(&[1], &[2]);

        let batch = normalize_batch(&head, &phot, &ReadOptions::default()).unwrap();

        assert_eq!(batch.rejected_rows, vec![1, 3]);
        assert_eq!(batch.photometry.len(), 2);
        assert!(batch.photometry.iter().all(|r| r.passband <= 5));
        assert_eq!(batch.photometry[0].flux, 0.0);
        assert_eq!(batch.photometry[1].flux, 20.0);
        assert_eq!(batch.photometry[1].flux_err, 2.0);
    }

    #[test]
    fn test_sentinel_with_known_band_is_kept_by_default() {
        let phot = raw_photometry(&[(100.0, "u "), (S, "g "), (101.0, "r ")]);
        let head = raw_header(&[1, 2], &[42, 42]);

        let batch = normalize_batch(&head, &phot, &ReadOptions::default()).unwrap();
        let mjd: Vec<_> = batch.photometry.iter().map(|r| r.mjd).collect();
        let ids: Vec<_> = batch.photometry.iter().map(|r| r.object_id).collect();
        assert_eq!(mjd, vec![100.0, S, 101.0]);
        assert_eq!(ids, vec![1, 2, 2]);
        assert!(batch.rejected_rows.is_empty());

        let options = ReadOptions {
            drop_separators: true,
        };
        let batch = normalize_batch(&head, &phot, &options).unwrap();
        let mjd: Vec<_> = batch.photometry.iter().map(|r| r.mjd).collect();
        assert_eq!(mjd, vec![100.0, 101.0]);
    }

    #[test]
    fn test_header_kept_without_photometry() {
        let phot = raw_photometry(&[(100.0, "X "), (S, "- "), (101.0, "i ")]);
        let head = raw_header(&[1, 2], &[91, 67]);

        let batch = normalize_batch(&head, &phot, &ReadOptions::default()).unwrap();

        assert_eq!(batch.header.len(), 2);
        assert_eq!(batch.photometry.len(), 1);
        assert_eq!(batch.photometry[0].object_id, 2);
        assert!(batch.header.iter().all(|h| h.true_target == 67));
    }

    #[test]
    fn test_mismatched_header_is_an_error() {
        let phot = raw_photometry(&[(100.0, "u "), (S, "- "), (101.0, "i ")]);
        let head = raw_header(&[1], &[1]);

        let err = normalize_batch(&head, &phot, &ReadOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SnanaError::SegmentCountMismatch {
                blocks: 2,
                headers: 1
            }
        );
    }
}
