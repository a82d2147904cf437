use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::error::CacheError;
use super::key::CacheKey;

/// Extension of stored entries, the container format the generator emits.
const AUDIO_EXT: &str = "mp3";

/// On-disk phrase cache: one directory per user, one file per phrase.
///
/// The directory listing is the index; there is no manifest. Entries are
/// written to a temp file and renamed into place, so a reader observes
/// either the complete old content or the complete new content, never a
/// partial write. Nothing is ever evicted; entries go away only through
/// [`PhraseCache::delete`].
pub struct PhraseCache {
    root: PathBuf,
}

impl PhraseCache {
    /// Open a cache rooted at `root`. The directory is created lazily on the
    /// first write, so opening never touches the disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        self.root.join(user_id)
    }

    fn entry_path(&self, user_id: &str, key: &CacheKey) -> PathBuf {
        self.user_dir(user_id).join(format!("{}.{}", key, AUDIO_EXT))
    }

    /// Read a cached entry. `None` is a miss, not an error.
    pub fn get(&self, user_id: &str, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(user_id, key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    /// Write an entry, creating the user namespace on first use. An existing
    /// entry is overwritten wholesale. Returns the entry's location.
    pub fn put(
        &self,
        user_id: &str,
        key: &CacheKey,
        bytes: &[u8],
    ) -> Result<PathBuf, CacheError> {
        let dir = self.user_dir(user_id);
        fs::create_dir_all(&dir).map_err(|e| CacheError::io(dir.clone(), e))?;

        // Temp file in the same directory so the rename stays on one
        // filesystem.
        let tmp = dir.join(format!(".{}.{}.tmp", key, std::process::id()));
        let write = |tmp: &Path| -> std::io::Result<()> {
            let mut file = fs::File::create(tmp)?;
            file.write_all(bytes)?;
            file.sync_all()
        };
        if let Err(e) = write(&tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::io(tmp, e));
        }

        let path = self.entry_path(user_id, key);
        fs::rename(&tmp, &path).map_err(|e| CacheError::io(path.clone(), e))?;
        Ok(path)
    }

    /// Whether an entry exists for this (user, key).
    pub fn exists(&self, user_id: &str, key: &CacheKey) -> bool {
        self.entry_path(user_id, key).is_file()
    }

    /// Keys cached for a user, lexicographically sorted. A user that never
    /// cached anything gets an empty listing, not an error.
    pub fn list(&self, user_id: &str) -> Result<Vec<CacheKey>, CacheError> {
        let dir = self.user_dir(user_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(dir, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::io(dir.clone(), e))?;
            let path = entry.path();
            // Skips temp files and anything else foreign to the cache.
            if path.extension().and_then(|e| e.to_str()) != Some(AUDIO_EXT) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(CacheKey::parse)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Remove an entry. `true` exactly when something was deleted.
    pub fn delete(&self, user_id: &str, key: &CacheKey) -> Result<bool, CacheError> {
        let path = self.entry_path(user_id, key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }
}
