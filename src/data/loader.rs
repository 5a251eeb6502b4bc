//! CSV Data Loader Module
//! Reads the catalog file with Polars and turns it into typed records.

use crate::data::record::{Dataset, RawRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = ["type", "date_added", "country", "listed_in"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read catalog file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog file {} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load and normalize a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        let raw = Self::read_raw(path)?;
        let dataset = Dataset::new(path, raw);

        info!(
            path = %path.display(),
            rows = dataset.len(),
            undated = dataset.undated_count(),
            "Loaded catalog"
        );
        Ok(dataset)
    }

    /// Read the required columns of a catalog file as raw text records.
    ///
    /// Every column is read as a string. Rows with too many or too few
    /// fields are truncated or padded with nulls instead of failing the load.
    pub fn read_raw(path: &Path) -> Result<Vec<RawRecord>, LoaderError> {
        std::fs::metadata(path).map_err(|source| LoaderError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        debug!(
            rows = df.height(),
            columns = df.width(),
            "Parsed CSV frame"
        );

        let [types, dates, countries, genres] = Self::required_columns(&df, path)?;

        let records = types
            .into_iter()
            .zip(dates)
            .zip(countries)
            .zip(genres)
            .map(|(((t, d), c), g)| RawRecord {
                content_type: t.map(str::to_string),
                date_added: d.map(str::to_string),
                country: c.map(str::to_string),
                listed_in: g.map(str::to_string),
            })
            .collect();

        Ok(records)
    }

    fn required_columns<'a>(
        df: &'a DataFrame,
        path: &Path,
    ) -> Result<[&'a StringChunked; 4], LoaderError> {
        let column = |name: &str| -> Result<&'a StringChunked, LoaderError> {
            let col = df.column(name).map_err(|_| LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;
            Ok(col.as_materialized_series().str()?)
        };

        Ok([
            column(REQUIRED_COLUMNS[0])?,
            column(REQUIRED_COLUMNS[1])?,
            column(REQUIRED_COLUMNS[2])?,
            column(REQUIRED_COLUMNS[3])?,
        ])
    }
}
