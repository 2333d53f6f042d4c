use std::path::PathBuf;

/// Returns the root board data directory path.
///
/// Resolution order:
/// 1. `VENDOR_BOARD_ROOT` environment variable (if set)
/// 2. Current working directory + `.vendor-board`
pub fn board_root() -> PathBuf {
    if let Ok(root) = std::env::var("VENDOR_BOARD_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".vendor-board")
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    board_root().join("config.yaml")
}

/// Returns the default path of the assessments data file.
pub fn default_data_file() -> PathBuf {
    board_root().join("assessments.yaml")
}
