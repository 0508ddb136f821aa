//! City list error types.

use std::path::PathBuf;

/// Errors that can occur when loading the city list.
#[derive(Debug, thiserror::Error)]
pub enum CityListError {
    /// The city file could not be read
    #[error("failed to read city list {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
