//! Data file resolution for the CLI.

use std::path::{Path, PathBuf};

/// Environment variable consulted when `--data-file` is not given.
pub const DATA_FILE_ENV: &str = "CSAIR_DATA_FILE";

/// Fallback data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "resources/map_data.json";

/// Resolve the data file path.
///
/// Searches in the following order:
/// 1. Explicit `--data-file` argument
/// 2. `CSAIR_DATA_FILE` environment variable
/// 3. `resources/map_data.json` in the working directory
pub fn resolve_data_file(explicit: Option<&Path>) -> PathBuf {
    resolve_with_env(explicit, std::env::var_os(DATA_FILE_ENV).map(PathBuf::from))
}

fn resolve_with_env(explicit: Option<&Path>, from_env: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    from_env
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
