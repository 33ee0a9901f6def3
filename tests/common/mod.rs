#![allow(dead_code)]
use camino::{Utf8Path, Utf8PathBuf};
use fitsio::tables::{ColumnDataType, ColumnDescription};
use fitsio::FitsFile;
use tempfile::TempDir;

pub const S: f64 = -777.0;

/// One raw SNANA photometry row: `(MJD, band, FLUXCAL, FLUXCALERR)`.
pub type PhotRow<'a> = (f64, &'a str, f32, f32);

/// One raw SNANA header row.
#[derive(Debug, Clone)]
pub struct HeadRow {
    pub snid: i32,
    pub sntype: i32,
    pub peakmjd: f32,
    pub redshift: f32,
    pub redshift_err: f32,
    pub mwebv: f32,
}

impl HeadRow {
    pub fn new(snid: i32, sntype: i32) -> Self {
        HeadRow {
            snid,
            sntype,
            peakmjd: 60010.5,
            redshift: 0.25,
            redshift_err: 0.5,
            mwebv: 0.125,
        }
    }
}

pub fn temp_dir() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, path)
}

/// Write a raw photometry table, with the filter column named `band_column`.
pub fn write_phot(path: &Utf8Path, rows: &[PhotRow], band_column: &str) {
    let descriptions = vec![
        ColumnDescription::new("MJD")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap(),
        ColumnDescription::new(band_column)
            .with_type(ColumnDataType::String)
            .that_repeats(2)
            .create()
            .unwrap(),
        ColumnDescription::new("FLUXCAL")
            .with_type(ColumnDataType::Float)
            .create()
            .unwrap(),
        ColumnDescription::new("FLUXCALERR")
            .with_type(ColumnDataType::Float)
            .create()
            .unwrap(),
    ];

    let mut fptr = FitsFile::create(path).overwrite().open().unwrap();
    let hdu = fptr.create_table("PHOTOMETRY", &descriptions).unwrap();
    if rows.is_empty() {
        return;
    }

    let mjd: Vec<f64> = rows.iter().map(|r| r.0).collect();
    let band: Vec<String> = rows.iter().map(|r| format!("{:<2}", r.1)).collect();
    let flux: Vec<f32> = rows.iter().map(|r| r.2).collect();
    let flux_err: Vec<f32> = rows.iter().map(|r| r.3).collect();
    hdu.write_col(&mut fptr, "MJD", &mjd).unwrap();
    hdu.write_col(&mut fptr, band_column, &band).unwrap();
    hdu.write_col(&mut fptr, "FLUXCAL", &flux).unwrap();
    hdu.write_col(&mut fptr, "FLUXCALERR", &flux_err).unwrap();
}

fn write_head_with(path: &Utf8Path, rows: &[HeadRow], string_snid: bool) {
    let snid_description = if string_snid {
        ColumnDescription::new("SNID")
            .with_type(ColumnDataType::String)
            .that_repeats(16)
            .create()
            .unwrap()
    } else {
        ColumnDescription::new("SNID")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap()
    };
    let float_column = |name: &str| {
        ColumnDescription::new(name)
            .with_type(ColumnDataType::Float)
            .create()
            .unwrap()
    };
    let descriptions = vec![
        snid_description,
        ColumnDescription::new("SNTYPE")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap(),
        float_column("PEAKMJD"),
        float_column("REDSHIFT_FINAL"),
        float_column("REDSHIFT_FINAL_ERR"),
        float_column("MWEBV"),
        float_column("HOSTGAL_MAG_r"),
    ];

    let mut fptr = FitsFile::create(path).overwrite().open().unwrap();
    let hdu = fptr.create_table("HEADER", &descriptions).unwrap();
    if rows.is_empty() {
        return;
    }

    if string_snid {
        let snid: Vec<String> = rows.iter().map(|r| r.snid.to_string()).collect();
        hdu.write_col(&mut fptr, "SNID", &snid).unwrap();
    } else {
        let snid: Vec<i32> = rows.iter().map(|r| r.snid).collect();
        hdu.write_col(&mut fptr, "SNID", &snid).unwrap();
    }
    let sntype: Vec<i32> = rows.iter().map(|r| r.sntype).collect();
    let peakmjd: Vec<f32> = rows.iter().map(|r| r.peakmjd).collect();
    let redshift: Vec<f32> = rows.iter().map(|r| r.redshift).collect();
    let redshift_err: Vec<f32> = rows.iter().map(|r| r.redshift_err).collect();
    let mwebv: Vec<f32> = rows.iter().map(|r| r.mwebv).collect();
    let host_mag: Vec<f32> = vec![21.5; rows.len()];
    hdu.write_col(&mut fptr, "SNTYPE", &sntype).unwrap();
    hdu.write_col(&mut fptr, "PEAKMJD", &peakmjd).unwrap();
    hdu.write_col(&mut fptr, "REDSHIFT_FINAL", &redshift).unwrap();
    hdu.write_col(&mut fptr, "REDSHIFT_FINAL_ERR", &redshift_err).unwrap();
    hdu.write_col(&mut fptr, "MWEBV", &mwebv).unwrap();
    hdu.write_col(&mut fptr, "HOSTGAL_MAG_r", &host_mag).unwrap();
}

/// Write a raw header table with an integer `SNID` column.
pub fn write_head(path: &Utf8Path, rows: &[HeadRow]) {
    write_head_with(path, rows, false);
}

/// Write a raw header table with a fixed-width string `SNID` column.
pub fn write_head_string_snid(path: &Utf8Path, rows: &[HeadRow]) {
    write_head_with(path, rows, true);
}

/// Write `<batch>_PHOT.FITS` and `<batch>_HEAD.FITS` in `dir`, returning the photometry path.
pub fn write_batch(
    dir: &Utf8Path,
    batch: &str,
    phot: &[PhotRow],
    head: &[HeadRow],
) -> Utf8PathBuf {
    let phot_path = dir.join(format!("{batch}_PHOT.FITS"));
    write_phot(&phot_path, phot, "BAND");
    write_head(&dir.join(format!("{batch}_HEAD.FITS")), head);
    phot_path
}

/// Compress `path` into `<path>.gz` and remove the uncompressed file.
pub fn gzip_in_place(path: &Utf8Path) -> Utf8PathBuf {
    use std::io::Write;

    let gz_path = Utf8PathBuf::from(format!("{path}.gz"));
    let raw = std::fs::read(path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(
        std::fs::File::create(&gz_path).unwrap(),
        flate2::Compression::default(),
    );
    encoder.write_all(&raw).unwrap();
    encoder.finish().unwrap();
    std::fs::remove_file(path).unwrap();
    gz_path
}
