// Data path utilities.
// Resolves where the selection store and the log file live on disk.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base data directory (~/.local/share/cinder on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cinder").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the remembered selection.
pub fn store_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("selection.json"))
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("cinder.log"))
}
