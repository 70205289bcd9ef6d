//! Table formats recognized by file extension.

use std::fmt;
use std::path::Path;

/// A storage format, identified by the file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    Tsv,
    Csv,
    Parquet,
    /// Parquet with gzip-compressed pages (`.parquet.gz`, `.parquet.gzip`).
    ParquetGzip,
    /// Arrow IPC (`.feather`).
    Feather,
    /// Spreadsheet (`.xls`, `.xlsx`).
    Excel,
    Xml,
    /// Array of row objects.
    Json,
    Sql,
    Hdf,
}

/// Compound suffixes come before the shorter ones they end with.
const SUFFIXES: &[(&str, TableFormat)] = &[
    (".parquet.gzip", TableFormat::ParquetGzip),
    (".parquet.gz", TableFormat::ParquetGzip),
    (".parquet", TableFormat::Parquet),
    (".feather", TableFormat::Feather),
    (".tsv", TableFormat::Tsv),
    (".csv", TableFormat::Csv),
    (".xlsx", TableFormat::Excel),
    (".xls", TableFormat::Excel),
    (".xml", TableFormat::Xml),
    (".json", TableFormat::Json),
    (".sql", TableFormat::Sql),
    (".hdf", TableFormat::Hdf),
];

impl TableFormat {
    /// Detect the format from a path's file name (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, format)| *format)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableFormat::Tsv => "tsv",
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
            TableFormat::ParquetGzip => "parquet+gzip",
            TableFormat::Feather => "feather",
            TableFormat::Excel => "excel",
            TableFormat::Xml => "xml",
            TableFormat::Json => "json",
            TableFormat::Sql => "sql",
            TableFormat::Hdf => "hdf",
        }
    }

    /// Whether [`crate::read_table`] can load this format.
    pub fn is_readable(&self) -> bool {
        matches!(
            self,
            TableFormat::Tsv
                | TableFormat::Csv
                | TableFormat::Parquet
                | TableFormat::ParquetGzip
                | TableFormat::Feather
                | TableFormat::Json
        )
    }

    /// Whether [`crate::write_table`] writes this format natively (others fall back to CSV).
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            TableFormat::Tsv
                | TableFormat::Csv
                | TableFormat::Parquet
                | TableFormat::ParquetGzip
                | TableFormat::Feather
        )
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
