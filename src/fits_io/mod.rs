//! # FITS I/O
//!
//! * [`reader`] – Load a SNANA batch (photometry + paired header) into canonical tables.
//! * [`writer`] – Write canonical tables back as FITS binary tables.
//! * *(crate-private)* `raw_table` – Column access to a SNANA binary table.
pub(crate) mod raw_table;
pub mod reader;
pub mod writer;

pub use reader::{read_fits, read_fits_pair};
pub use writer::{save_fits, FitsTable};
