//! Read a table from disk, dispatching on the file extension.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use annot_common::MISSING_TOKENS;
use polars::prelude::{
    CsvParseOptions, CsvReadOptions, DataFrame, IpcReader, JsonReader, NullValues, ParquetReader,
    SerReader,
};
use tracing::{info, info_span, warn};

use crate::error::{IngestError, Result};
use crate::format::TableFormat;

/// Rows sampled for CSV/TSV dtype inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Read a table from `path`.
///
/// TSV, CSV, Parquet (plain or gzip-compressed pages), Feather and JSON
/// (an array of row objects) are read. Spreadsheet, XML, SQL and HDF files
/// are recognized but rejected with [`IngestError::UnsupportedFormat`].
///
/// # Errors
///
/// Fails if the extension is unknown, the file is missing or unreadable, the
/// content cannot be parsed, or a header cell is blank.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let format = TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedExtension {
        path: path.to_path_buf(),
    })?;
    let span = info_span!("read_table", path = %path.display(), format = %format);
    let _guard = span.enter();
    let start = Instant::now();

    let df = match format {
        TableFormat::Tsv => read_delimited(path, format, b'\t')?,
        TableFormat::Csv => read_delimited(path, format, b',')?,
        TableFormat::Parquet | TableFormat::ParquetGzip => {
            ParquetReader::new(open(path)?)
                .finish()
                .map_err(|e| parse_error(path, format, &e))?
        }
        TableFormat::Feather => IpcReader::new(open(path)?)
            .finish()
            .map_err(|e| parse_error(path, format, &e))?,
        TableFormat::Json => JsonReader::new(open(path)?)
            .finish()
            .map_err(|e| parse_error(path, format, &e))?,
        TableFormat::Excel | TableFormat::Xml | TableFormat::Sql | TableFormat::Hdf => {
            warn!("recognized table format cannot be read");
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                format,
            });
        }
    };

    validate_header(&df, path)?;
    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(df)
}

fn read_delimited(path: &Path, format: TableFormat, separator: u8) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_null_values(Some(missing_tokens())),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(path, format, &e))?
        .finish()
        .map_err(|e| parse_error(path, format, &e))
}

/// Missing tokens become nulls while parsing so they cannot force a text dtype.
fn missing_tokens() -> NullValues {
    NullValues::AllColumns(MISSING_TOKENS.iter().map(|token| (*token).into()).collect())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn parse_error(path: &Path, format: TableFormat, err: &dyn std::fmt::Display) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        format,
        message: err.to_string(),
    }
}

fn validate_header(df: &DataFrame, path: &Path) -> Result<()> {
    if df.get_column_names().iter().any(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{content}").unwrap();
        path
    }

    #[test]
    fn reads_tsv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "submission.tsv",
            "compound\tadduct\trt_min\n1\t[M+H]+\t4.2\n2\t[M-H]-\t5.0\n",
        );
        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        assert_eq!(
            df.column("rt_min").unwrap().dtype(),
            &polars::prelude::DataType::Float64
        );
    }

    #[test]
    fn missing_tokens_keep_numeric_dtype() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "submission.csv",
            "rt_min,adduct\n1.5,Na\nNA,[M+H]+\n2.0,N/A\n",
        );
        let df = read_table(&path).unwrap();
        let rt = df.column("rt_min").unwrap();
        assert_eq!(rt.dtype(), &polars::prelude::DataType::Float64);
        assert_eq!(rt.null_count(), 1);
        let adduct = df.column("adduct").unwrap();
        assert_eq!(adduct.get(0).unwrap(), polars::prelude::AnyValue::String("Na"));
        assert_eq!(adduct.null_count(), 1);
    }

    #[test]
    fn reads_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "submission.csv", "compound,adduct\n1,[M+H]+\n");
        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn reads_json_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "submission.json",
            r#"[{"compound": 1, "adduct": "[M+H]+"}, {"compound": 2, "adduct": null}]"#,
        );
        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("adduct").unwrap().null_count(), 1);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_table(&dir.path().join("absent.tsv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        let err = read_table(&dir.path().join("absent.parquet")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn recognized_but_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "sheet.xlsx", "not really a spreadsheet");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat {
                format: TableFormat::Excel,
                ..
            }
        ));
    }

    #[test]
    fn unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", "a,b\n1,2\n");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedExtension { .. }));
    }

    #[test]
    fn garbage_parquet_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.parquet", "this is not parquet");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }
}
