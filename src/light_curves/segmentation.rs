//! # Sentinel-delimited segmentation of the photometry stream
//!
//! SNANA photometry files concatenate the light curves of every simulated object of a
//! batch into a single table. Consecutive light curves are separated by a **sentinel row**
//! whose timestamp is [`SENTINEL_MJD`]. The header table lists the objects in the same
//! order, so the k-th block of the stream belongs to the k-th header row.
//!
//! This module works on plain timestamp slices and knows nothing about files:
//!
//! * [`trim_sentinels`] – drop a stray sentinel at each end of the stream (at most one per end).
//! * [`block_boundaries`] – positions `[0, s₁, …, sₙ, len]` delimiting the blocks.
//! * [`assign_object_ids`] – expand one identifier per block into one identifier per row.
//!
//! Invariants
//! -----------------
//! * Blocks are half-open ranges `[b_k, b_{k+1})`: an interior sentinel row belongs to the
//!   block that **follows** it. Sentinel rows are discarded later, so their label is irrelevant.
//! * The number of blocks must equal the number of identifiers; a mismatch is reported as
//!   [`SnanaError::SegmentCountMismatch`] rather than silently shifting labels.
use std::ops::Range;

use itertools::Itertools;

use crate::constants::{ObjectId, MJD, SENTINEL_MJD};
use crate::snana_errors::SnanaError;

/// Whether a timestamp marks a separator row.
#[inline]
pub fn is_sentinel(mjd: MJD) -> bool {
    mjd == SENTINEL_MJD
}

/// Range of rows kept after trimming stray sentinels at both ends of the stream.
///
/// The last row is checked first, then the first row of what remains. The two checks
/// are independent: at most one row is removed from each end, even when several
/// sentinels are stacked.
///
/// Arguments
/// -----------------
/// * `mjd` – Timestamps of the raw photometry stream.
///
/// Return
/// ----------
/// * The half-open range of retained row positions in `mjd`.
pub fn trim_sentinels(mjd: &[MJD]) -> Range<usize> {
    let mut end = mjd.len();
    if end > 0 && is_sentinel(mjd[end - 1]) {
        end -= 1;
    }

    let mut start = 0;
    if start < end && is_sentinel(mjd[start]) {
        start += 1;
    }

    start..end
}

/// Boundaries of the sentinel-delimited blocks: `0`, every sentinel position, then `mjd.len()`.
pub fn block_boundaries(mjd: &[MJD]) -> Vec<usize> {
    std::iter::once(0)
        .chain(mjd.iter().positions(|&t| is_sentinel(t)))
        .chain(std::iter::once(mjd.len()))
        .collect()
}

/// Label every row of a (trimmed) photometry stream with its object identifier.
///
/// Arguments
/// -----------------
/// * `mjd` – Timestamps of the trimmed stream; interior sentinel rows split the blocks.
/// * `object_ids` – One identifier per block, in stream order (the header table order).
///
/// Return
/// ----------
/// * A vector parallel to `mjd`, holding the identifier of the block each row falls in.
///
/// Errors
/// ----------
/// * [`SnanaError::SegmentCountMismatch`] when the number of blocks differs from
///   `object_ids.len()`.
pub fn assign_object_ids(
    mjd: &[MJD],
    object_ids: &[ObjectId],
) -> Result<Vec<ObjectId>, SnanaError> {
    let boundaries = block_boundaries(mjd);
    let blocks = boundaries.len() - 1;
    if blocks != object_ids.len() {
        return Err(SnanaError::SegmentCountMismatch {
            blocks,
            headers: object_ids.len(),
        });
    }

    let mut labels = Vec::with_capacity(mjd.len());
    for ((start, end), &id) in boundaries.iter().tuple_windows().zip(object_ids) {
        labels.extend(std::iter::repeat(id).take(end - start));
    }
    Ok(labels)
}
