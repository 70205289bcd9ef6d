//! Table I/O for annotation submissions.
//!
//! Tables are read and written by file extension; see [`TableFormat`] for
//! the recognized suffixes.

pub mod error;
pub mod format;
pub mod paths;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use format::TableFormat;
pub use paths::{add_filename_suffix, parquet_path, replace_format};
pub use reader::read_table;
pub use writer::write_table;
