pub mod batch;
pub mod constants;
pub mod fits_io;
pub mod light_curves;
pub mod snana_errors;

pub use batch::{convert_batch, convert_directory, BatchOutcome, BatchSummary};
pub use fits_io::{read_fits, save_fits};
pub use light_curves::{
    HeaderRecord, HeaderTable, PhotometryRecord, PhotometryTable, ReadOptions,
};
pub use snana_errors::SnanaError;
