//! Serialize canonical tables back to FITS binary tables.
//!
//! The batch driver only produces CSV files; this writer keeps the FITS side of the
//! conversion symmetric, e.g. to hand normalized tables to FITS-based tools.
use camino::Utf8Path;
use fitsio::hdu::FitsHdu;
use fitsio::tables::{ColumnDataType, ColumnDescription, ConcreteColumnDescription};
use fitsio::FitsFile;

use crate::light_curves::{HeaderRecord, PhotometryRecord, TableRecord};
use crate::snana_errors::SnanaError;

/// A canonical record type that can be laid out as a FITS binary table.
///
/// Only the columns of [`TableRecord::COLUMNS`] are written; the row label
/// (`index`) never becomes a column.
pub trait FitsTable: TableRecord + Sized {
    /// `EXTNAME` of the written extension.
    const EXTNAME: &'static str;

    /// FITS type of each column of [`TableRecord::COLUMNS`], in the same order.
    const COLUMN_TYPES: &'static [ColumnDataType];

    /// Write every column of `rows` into `hdu`.
    fn write_columns(rows: &[Self], fptr: &mut FitsFile, hdu: &FitsHdu) -> Result<(), SnanaError>;
}

impl FitsTable for HeaderRecord {
    const EXTNAME: &'static str = "HEADER";
    const COLUMN_TYPES: &'static [ColumnDataType] = &[
        ColumnDataType::Int,
        ColumnDataType::Int,
        ColumnDataType::Float,
        ColumnDataType::Float,
        ColumnDataType::Float,
        ColumnDataType::Float,
    ];

    fn write_columns(rows: &[Self], fptr: &mut FitsFile, hdu: &FitsHdu) -> Result<(), SnanaError> {
        let object_id: Vec<i32> = rows.iter().map(|r| r.object_id).collect();
        let true_target: Vec<i32> = rows.iter().map(|r| r.true_target).collect();
        let true_peakmjd: Vec<f32> = rows.iter().map(|r| r.true_peakmjd).collect();
        let true_z: Vec<f32> = rows.iter().map(|r| r.true_z).collect();
        let true_z_err: Vec<f32> = rows.iter().map(|r| r.true_z_err).collect();
        let mwebv: Vec<f32> = rows.iter().map(|r| r.mwebv).collect();

        hdu.write_col(fptr, "object_id", &object_id)?;
        hdu.write_col(fptr, "true_target", &true_target)?;
        hdu.write_col(fptr, "true_peakmjd", &true_peakmjd)?;
        hdu.write_col(fptr, "true_z", &true_z)?;
        hdu.write_col(fptr, "true_z_err", &true_z_err)?;
        hdu.write_col(fptr, "mwebv", &mwebv)?;
        Ok(())
    }
}

impl FitsTable for PhotometryRecord {
    const EXTNAME: &'static str = "PHOTOMETRY";
    const COLUMN_TYPES: &'static [ColumnDataType] = &[
        ColumnDataType::Int,
        ColumnDataType::Double,
        ColumnDataType::Int,
        ColumnDataType::Float,
        ColumnDataType::Float,
    ];

    fn write_columns(rows: &[Self], fptr: &mut FitsFile, hdu: &FitsHdu) -> Result<(), SnanaError> {
        let object_id: Vec<i32> = rows.iter().map(|r| r.object_id).collect();
        let mjd: Vec<f64> = rows.iter().map(|r| r.mjd).collect();
        let passband: Vec<i32> = rows.iter().map(|r| i32::from(r.passband)).collect();
        let flux: Vec<f32> = rows.iter().map(|r| r.flux).collect();
        let flux_err: Vec<f32> = rows.iter().map(|r| r.flux_err).collect();

        hdu.write_col(fptr, "object_id", &object_id)?;
        hdu.write_col(fptr, "mjd", &mjd)?;
        hdu.write_col(fptr, "passband", &passband)?;
        hdu.write_col(fptr, "flux", &flux)?;
        hdu.write_col(fptr, "flux_err", &flux_err)?;
        Ok(())
    }
}

fn column_descriptions<T: FitsTable>() -> Result<Vec<ConcreteColumnDescription>, SnanaError> {
    T::COLUMNS
        .iter()
        .zip(T::COLUMN_TYPES)
        .map(|(name, typ)| {
            ColumnDescription::new(*name)
                .with_type(typ.clone())
                .create()
                .map_err(SnanaError::from)
        })
        .collect()
}

/// Save a canonical table as a FITS binary table.
///
/// Parent directories are created as needed and an existing file at `path` is
/// overwritten.
///
/// Arguments
/// -----------------
/// * `rows` – Records to write, in output row order.
/// * `path` – Output file, conventionally ending in `.FITS`.
pub fn save_fits<T: FitsTable>(rows: &[T], path: &Utf8Path) -> Result<(), SnanaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let descriptions = column_descriptions::<T>()?;
    let mut fptr = FitsFile::create(path).overwrite().open()?;
    let hdu = fptr.create_table(T::EXTNAME, &descriptions)?;
    if !rows.is_empty() {
        T::write_columns(rows, &mut fptr, &hdu)?;
    }
    Ok(())
}
