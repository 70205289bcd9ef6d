//! File name helpers for derived outputs.

use std::path::{Path, PathBuf};

fn with_dot(format: &str) -> String {
    if format.is_empty() || format.starts_with('.') {
        format.to_string()
    } else {
        format!(".{format}")
    }
}

fn stem_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    path.with_file_name(stem)
}

/// Swap the last extension of `path` for `format` (leading dot optional).
///
/// ```
/// use std::path::Path;
/// use annot_ingest::replace_format;
///
/// assert_eq!(replace_format(Path::new("data/casmi.tsv"), "parquet"), Path::new("data/casmi.parquet"));
/// ```
pub fn replace_format(path: &Path, format: &str) -> PathBuf {
    let mut name = stem_path(path).into_os_string();
    name.push(with_dot(format));
    PathBuf::from(name)
}

/// Insert `_suffix` before the extension, optionally replacing the extension.
pub fn add_filename_suffix(path: &Path, suffix: &str, format: Option<&str>) -> PathBuf {
    let extension = match format {
        Some(format) => with_dot(format),
        None => path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    };
    let mut name = stem_path(path).into_os_string();
    name.push(format!("_{suffix}{extension}"));
    PathBuf::from(name)
}

/// Parquet sibling of `path`, gzip-flavoured when `gzip` is set.
pub fn parquet_path(path: &Path, gzip: bool) -> PathBuf {
    if gzip {
        replace_format(path, ".parquet.gzip")
    } else {
        replace_format(path, ".parquet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_format_adds_missing_dot() {
        assert_eq!(replace_format(Path::new("a/b.tsv"), ".csv"), Path::new("a/b.csv"));
        assert_eq!(replace_format(Path::new("a/b"), "csv"), Path::new("a/b.csv"));
    }

    #[test]
    fn filename_suffix() {
        assert_eq!(
            add_filename_suffix(Path::new("runs/casmi.tsv"), "issues", None),
            Path::new("runs/casmi_issues.tsv")
        );
        assert_eq!(
            add_filename_suffix(Path::new("runs/casmi.tsv"), "issues", Some("json")),
            Path::new("runs/casmi_issues.json")
        );
        assert_eq!(
            add_filename_suffix(Path::new("casmi"), "issues", None),
            Path::new("casmi_issues")
        );
    }

    #[test]
    fn parquet_paths() {
        assert_eq!(parquet_path(Path::new("x/meta.tsv"), false), Path::new("x/meta.parquet"));
        assert_eq!(parquet_path(Path::new("x/meta.tsv"), true), Path::new("x/meta.parquet.gzip"));
    }
}
