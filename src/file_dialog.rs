use crate::{MovieDashError, MovieDashResult};

use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// Opens a file dialog asynchronously, allowing the user to choose a
/// movie CSV file.
///
/// # Returns
///
/// - `Ok(PathBuf)`: The path to the selected file.
/// - `Err(MovieDashError::FileNotFound)`: If the user cancels the dialog.
pub async fn open_file() -> MovieDashResult<PathBuf> {
    let opt_file = AsyncFileDialog::new()
        .add_filter("CSV Files", &["csv"])
        .pick_file()
        .await;

    opt_file
        .map(|file| file.path().to_path_buf()) // Extract PathBuf from FileHandle.
        .ok_or_else(|| MovieDashError::FileNotFound(PathBuf::new())) // Convert None to error.
}
