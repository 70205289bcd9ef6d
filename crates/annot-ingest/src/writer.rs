//! Write a table to disk, dispatching on the file extension.

use std::fs::File;
use std::path::Path;

use polars::prelude::{
    CsvWriter, DataFrame, IpcWriter, ParquetCompression, ParquetWriter, SerWriter,
};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::format::TableFormat;

/// Write `df` to `path`.
///
/// TSV, CSV, Parquet, gzip-compressed Parquet and Feather are written by
/// extension; any other path is written as comma-separated text.
pub fn write_table(df: &DataFrame, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path)
        .filter(TableFormat::is_writable)
        .unwrap_or(TableFormat::Csv);
    info!(path = %path.display(), format = %format, rows = df.height(), "exporting table");

    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df = df.clone();
    let written = match format {
        TableFormat::Tsv => write_delimited(file, &mut df, b'\t'),
        TableFormat::Parquet => ParquetWriter::new(file).finish(&mut df).map(|_| ()),
        TableFormat::ParquetGzip => ParquetWriter::new(file)
            .with_compression(ParquetCompression::Gzip(None))
            .finish(&mut df)
            .map(|_| ()),
        TableFormat::Feather => IpcWriter::new(file).finish(&mut df),
        _ => write_delimited(file, &mut df, b','),
    };
    written.map_err(|e| IngestError::Serialize {
        path: path.to_path_buf(),
        format,
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "table written");
    Ok(())
}

fn write_delimited(
    mut file: File,
    df: &mut DataFrame,
    separator: u8,
) -> polars::prelude::PolarsResult<()> {
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .finish(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_table;
    use polars::prelude::{Column, NamedFrom};
    use tempfile::TempDir;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("compound".into(), [1i64, 2, 3]),
            Column::new("adduct".into(), [Some("[M+H]+"), None, Some("[M+Na]+")]),
            Column::new("rt_min".into(), [1.5, 2.25, 30.0]),
        ])
        .unwrap()
    }

    #[test]
    fn round_trips_native_formats() {
        let dir = TempDir::new().unwrap();
        for name in ["out.tsv", "out.csv", "out.parquet", "out.parquet.gzip", "out.feather"] {
            let path = dir.path().join(name);
            write_table(&sample(), &path).unwrap();
            let back = read_table(&path).unwrap();
            assert!(back.equals_missing(&sample()), "round trip through {name}");
        }
    }

    #[test]
    fn unknown_extension_falls_back_to_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        write_table(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("compound,adduct,rt_min\n"));
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.tsv");
        let err = write_table(&sample(), &path).unwrap_err();
        assert!(matches!(err, IngestError::FileWrite { .. }));
    }
}
