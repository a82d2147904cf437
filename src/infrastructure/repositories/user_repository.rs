use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::domain::user::UserRegistry;
use crate::error::{AppError, AppResult};

/// File-backed store for the user registry.
///
/// The registry is small, so every operation reads or rewrites the whole
/// file. Saves go through a temp file and rename, the same discipline as the
/// phrase cache, so a crash never leaves a torn registry behind.
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the registry; a missing file is an empty registry.
    pub fn load(&self) -> AppResult<UserRegistry> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(format!(
                    "corrupt user registry {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(UserRegistry::default()),
            Err(e) => Err(AppError::Storage(format!(
                "cannot read user registry {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    pub fn save(&self, registry: &UserRegistry) -> AppResult<()> {
        let parent = self.path.parent().map(PathBuf::from).unwrap_or_default();
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(&parent).map_err(|e| {
                AppError::Storage(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_vec_pretty(registry)
            .map_err(|e| AppError::Internal(format!("cannot encode user registry: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            AppError::Storage(format!(
                "cannot write user registry {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
