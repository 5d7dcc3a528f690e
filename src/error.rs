use polars::prelude::PolarsError;
use std::{io, path::PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/**
Result type to simplify function signatures.

Functions can return `MovieDashResult<T>` and then use `?` to automatically
propagate errors.
*/
pub type MovieDashResult<T> = Result<T, MovieDashError>;

/**
Custom error type for the movie dashboard.

This enum defines all the possible errors that can occur in the application.

We use the `thiserror` crate to derive the `Error` trait and automatically
implement `Display` using the `#[error(...)]` attribute.
*/
#[derive(Error, Debug)]
pub enum MovieDashError {
    // Wrapper for standard IO errors.
    // The #[from] attribute automatically converts io::Error to MovieDashError::Io.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Wrapper for Polars errors (from the Polars library).
    // Handles errors from CSV parsing, including inconsistent columns or bad data.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    // Indicates that a specified file could not be found, storing the attempted path.
    #[error("File not found: {0:#?}")]
    FileNotFound(PathBuf),

    // The dataset file was readable but lacks one of the columns the dashboard needs.
    #[error("Dataset is missing required column: '{0}'")]
    MissingColumn(String),

    // Indicates an invalid CSV delimiter was provided (empty or too long).
    #[error("Invalid CSV delimiter: '{0}'")]
    InvalidDelimiter(String),

    // Wrapper for Tokio JoinErrors, occurring when asynchronous tasks fail.
    #[error("Tokio JoinError: {0}")]
    TokioJoin(#[from] JoinError),
}
