use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnanaError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("FITS I/O error: {0}")]
    FitsError(#[from] fitsio::errors::Error),

    #[error("CSV serialization error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Paired header file not found at: {0}")]
    MissingHeaderFile(Utf8PathBuf),

    #[error("File name does not follow the photometry naming convention: {0}")]
    NotAPhotometryFile(Utf8PathBuf),

    #[error("HDU {hdu} of {path} is not a binary table")]
    NotABinaryTable { path: Utf8PathBuf, hdu: usize },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: Utf8PathBuf, column: String },

    #[error("Invalid object identifier in header table: '{0}'")]
    InvalidObjectId(String),

    #[error(
        "Photometry stream holds {blocks} sentinel-delimited blocks but the header table has {headers} rows"
    )]
    SegmentCountMismatch { blocks: usize, headers: usize },
}

impl PartialEq for SnanaError {
    fn eq(&self, other: &Self) -> bool {
        use SnanaError::*;
        match (self, other) {
            // Wrapped library errors are not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (FitsError(_), FitsError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (MissingHeaderFile(a), MissingHeaderFile(b)) => a == b,
            (NotAPhotometryFile(a), NotAPhotometryFile(b)) => a == b,
            (
                NotABinaryTable { path: pa, hdu: ha },
                NotABinaryTable { path: pb, hdu: hb },
            ) => pa == pb && ha == hb,
            (
                MissingColumn {
                    path: pa,
                    column: ca,
                },
                MissingColumn {
                    path: pb,
                    column: cb,
                },
            ) => pa == pb && ca == cb,
            (InvalidObjectId(a), InvalidObjectId(b)) => a == b,
            (
                SegmentCountMismatch {
                    blocks: ba,
                    headers: ha,
                },
                SegmentCountMismatch {
                    blocks: bb,
                    headers: hb,
                },
            ) => ba == bb && ha == hb,

            _ => false,
        }
    }
}
