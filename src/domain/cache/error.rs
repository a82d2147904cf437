use std::path::PathBuf;

/// Local storage failure in the phrase cache.
///
/// A missing entry is never an error; every variant here is a real I/O
/// failure, so callers can always tell a broken disk from a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
