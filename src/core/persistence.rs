//! Persistence of user preferences (last used listing filters) in ~/.config/idx-browser/.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::filters::PropertyFilters;
use crate::core::paths;

const LAST_FILTERS_FILE: &str = "last_filters.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("no config directory")]
    NoConfigDir,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode filters: {0}")]
    Encode(#[from] serde_json::Error),
}

fn last_filters_path() -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join(LAST_FILTERS_FILE))
}

/// Load the filters from the previous session. Missing or unreadable files yield `None`.
/// The page is reset to the first one.
pub fn load_last_filters() -> Option<PropertyFilters> {
    let path = last_filters_path()?;
    let text = fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<PropertyFilters>(&text) {
        Ok(mut filters) => {
            filters.page = 0;
            Some(filters)
        }
        Err(e) => {
            log::warn!("Ignoring corrupt {}: {}", path.display(), e);
            None
        }
    }
}

/// Save filters to disk. Creates the config directory if needed.
pub fn save_last_filters(filters: &PropertyFilters) -> Result<(), PersistenceError> {
    let path = last_filters_path().ok_or(PersistenceError::NoConfigDir)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(filters)?;
    fs::write(&path, json).map_err(|source| PersistenceError::Io { path, source })
}
