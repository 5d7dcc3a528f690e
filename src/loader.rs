//! Loads the movie CSV into a `MovieDataset`.
//!
//! The file is read with Polars (lossy UTF-8, empty fields as nulls) with
//! schema inference disabled, so every column arrives as text and all
//! coercion happens in `MovieDataset::from_dataframe`. Reading runs on a
//! blocking thread so the UI never stalls.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Arguments, MovieDashError, MovieDashResult, MovieDataset};

/// Settings for one dataset load.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Path to the movie metadata CSV file.
    pub path: PathBuf,
    /// CSV field separator.
    pub csv_delimiter: u8,
}

impl LoadSettings {
    /// Builds settings from command-line arguments, validating the delimiter.
    pub fn new(args: &Arguments) -> MovieDashResult<Self> {
        Ok(LoadSettings {
            path: args.path.clone(),
            csv_delimiter: parse_delimiter(&args.delimiter)?,
        })
    }

    /// Settings for a path picked at runtime (File menu or drag-and-drop),
    /// keeping the current delimiter.
    pub fn with_path(&self, path: &Path) -> Self {
        LoadSettings {
            path: path.to_path_buf(),
            csv_delimiter: self.csv_delimiter,
        }
    }
}

impl Default for LoadSettings {
    fn default() -> Self {
        LoadSettings {
            path: PathBuf::new(),
            csv_delimiter: b',',
        }
    }
}

/// The delimiter must be exactly one byte (",", ";", "\t", ...).
fn parse_delimiter(delimiter: &str) -> MovieDashResult<u8> {
    match delimiter.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(MovieDashError::InvalidDelimiter(delimiter.to_string())),
    }
}

/// Loads and validates the dataset.
///
/// Returns an error if the file is missing or unparseable as a whole; the
/// caller decides whether that degrades to an empty dataset (startup) or
/// raises a notification (user-initiated load). Rows dropped for bad years
/// are logged here, not treated as errors.
pub async fn load_dataset(settings: LoadSettings) -> MovieDashResult<MovieDataset> {
    debug!("fn load_dataset()\nsettings: {settings:#?}");

    if !settings.path.is_file() {
        return Err(MovieDashError::FileNotFound(settings.path));
    }

    // Run the blocking Polars read on a dedicated thread.
    let df = tokio::task::spawn_blocking(move || {
        read_csv_as_text(&settings.path, settings.csv_delimiter)
    })
    .await??;

    debug!("CSV read complete. Shape: {:?}", df.shape());

    let (dataset, issues) = MovieDataset::from_dataframe(&df)?;

    if !issues.is_empty() {
        warn!(
            "Dropped {} row(s) with non-numeric release years.",
            issues.len()
        );
        for issue in &issues {
            debug!(
                "Dropped row {}: Released_Year = {:?}",
                issue.row, issue.year_value
            );
        }
    }

    debug!(
        "Loaded {} movie records, {} distinct genre tags.",
        dataset.len(),
        dataset.genre_tags().len()
    );

    Ok(dataset)
}

/// Reads a CSV file with all columns as String.
///
/// Option notes:
/// - `with_infer_schema_length(Some(0))`: infer the schema from the header
///   row only, so every column is read as String and coercion stays in one
///   place (`dataset.rs`).
/// - `ignore_errors(true)`: skip malformed fields rather than failing the
///   whole read.
/// - `missing_is_null(true)`: treat empty fields (`""`) as null values.
fn read_csv_as_text(path: &Path, delimiter: u8) -> MovieDashResult<DataFrame> {
    let csv_parse_options = CsvParseOptions::default()
        .with_encoding(CsvEncoding::LossyUtf8) // Handle potentially non-strict UTF8
        .with_missing_is_null(true)
        .with_separator(delimiter);

    let df = CsvReadOptions::default()
        .with_parse_options(csv_parse_options)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_ignore_errors(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}
