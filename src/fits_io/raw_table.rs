//! Column access to a SNANA binary table.
//!
//! SNANA stores both tables of a batch in the first extension (HDU 1) of their file,
//! optionally gzip-compressed; `cfitsio` decompresses `.gz` files transparently on open.
use camino::{Utf8Path, Utf8PathBuf};
use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::tables::{ColumnDataType, ConcreteColumnDescription, ReadsCol};
use fitsio::FitsFile;

use crate::constants::ObjectId;
use crate::snana_errors::SnanaError;

/// HDU holding the table in SNANA files.
const TABLE_HDU: usize = 1;

pub(crate) struct RawTable {
    path: Utf8PathBuf,
    fptr: FitsFile,
    hdu: FitsHdu,
    columns: Vec<ConcreteColumnDescription>,
    num_rows: usize,
}

impl RawTable {
    pub(crate) fn open(path: &Utf8Path) -> Result<Self, SnanaError> {
        let mut fptr = FitsFile::open(path)?;
        let hdu = fptr.hdu(TABLE_HDU)?;

        let (columns, num_rows) = match &hdu.info {
            HduInfo::TableInfo {
                column_descriptions,
                num_rows,
                ..
            } => (column_descriptions.clone(), *num_rows),
            _ => {
                return Err(SnanaError::NotABinaryTable {
                    path: path.to_owned(),
                    hdu: TABLE_HDU,
                })
            }
        };

        Ok(RawTable {
            path: path.to_owned(),
            fptr,
            hdu,
            columns,
            num_rows,
        })
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn column(&self, name: &str) -> Result<&ConcreteColumnDescription, SnanaError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SnanaError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// First column of `candidates` present in the table.
    pub(crate) fn first_present<'a>(&self, candidates: &[&'a str]) -> Result<&'a str, SnanaError> {
        candidates
            .iter()
            .copied()
            .find(|name| self.columns.iter().any(|c| c.name == *name))
            .ok_or_else(|| SnanaError::MissingColumn {
                path: self.path.clone(),
                column: candidates.join("|"),
            })
    }

    /// Read a whole column, letting `cfitsio` convert the on-disk type to `T`.
    pub(crate) fn read<T: ReadsCol>(&mut self, name: &str) -> Result<Vec<T>, SnanaError> {
        self.column(name)?;
        Ok(self.hdu.read_col::<T>(&mut self.fptr, name)?)
    }

    /// Read an identifier column as 32-bit integers.
    ///
    /// Depending on the SNANA version, `SNID` is stored either as an integer or as a
    /// fixed-width string; string values are trimmed and parsed.
    pub(crate) fn read_object_ids(&mut self, name: &str) -> Result<Vec<ObjectId>, SnanaError> {
        let is_string = matches!(self.column(name)?.data_type.typ, ColumnDataType::String);
        if !is_string {
            return self.read::<ObjectId>(name);
        }

        self.read::<String>(name)?
            .iter()
            .map(|raw| {
                let trimmed = raw.trim();
                trimmed
                    .parse::<ObjectId>()
                    .map_err(|_| SnanaError::InvalidObjectId(trimmed.to_string()))
            })
            .collect()
    }
}
