//! CSV Loader Module
//! Handles reading analytics exports and writing the processed table using Polars.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to open output file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Load a CSV export with every column kept as a raw string.
///
/// Exports mix numeric formats freely ("1,200", "$300.00"), so schema
/// inference is disabled and coercion happens downstream. Lines starting
/// with '#' are skipped; GA4 exports prepend a comment preamble.
pub fn read_table(path: &Path) -> Result<DataFrame, LoaderError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .with_comment_prefix(Some("#".into()))
        .finish()?
        .collect()?;
    Ok(df)
}

/// Write the table to `path` with a header row and no index column.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<(), LoaderError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_keeps_all_columns_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, "URL,Visits\n/home,\"1,200\"\n").unwrap();

        let df = read_table(&path).unwrap();
        assert_eq!(df.shape(), (1, 2));
        for col in df.get_columns() {
            assert_eq!(col.dtype(), &DataType::String);
        }
    }

    #[test]
    fn read_skips_comment_preamble() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "# GA4 export").unwrap();
        writeln!(f, "# generated 2024-01-01").unwrap();
        writeln!(f, "URL,Visits").unwrap();
        writeln!(f, "/home,500").unwrap();
        drop(f);

        let df = read_table(&path).unwrap();
        assert_eq!(df.shape(), (1, 2));
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["URL", "Visits"]);
    }

    #[test]
    fn write_then_read_round_trips_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut df = DataFrame::new(vec![
            Column::new("Landing page".into(), vec!["/home", "/about"]),
            Column::new("Sessions".into(), vec!["1,200", "500"]),
        ])
        .unwrap();
        write_table(&mut df, &path).unwrap();

        let back = read_table(&path).unwrap();
        assert_eq!(back.shape(), (2, 2));
        let pages = back.column("Landing page").unwrap().str().unwrap();
        assert_eq!(pages.get(1), Some("/about"));
        let sessions = back.column("Sessions").unwrap().str().unwrap();
        assert_eq!(sessions.get(0), Some("1,200"));
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_table(&dir.path().join("nope.csv")).is_err());
    }
}
