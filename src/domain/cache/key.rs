use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a derived cache key, in characters.
pub const MAX_KEY_LENGTH: usize = 100;

/// Filesystem-safe identifier for a phrase within a user namespace.
///
/// A key is always a single safe path segment: lowercase alphanumerics and
/// underscores, at most [`MAX_KEY_LENGTH`] characters, no separators and no
/// control characters. Keys are normally produced by [`CacheKey::derive`];
/// [`CacheKey::parse`] accepts a string that already has that shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the cache key for a phrase.
    ///
    /// Policy: lowercase the phrase, drop everything that is not
    /// alphanumeric or whitespace, collapse whitespace runs to a single
    /// underscore, truncate to [`MAX_KEY_LENGTH`] characters. Deterministic
    /// and total; two phrases that normalize to the same slug share a cache
    /// entry.
    pub fn derive(phrase: &str) -> Self {
        let lowered = phrase.to_lowercase();
        let kept: String = lowered
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        let whitespace = regex::Regex::new(r"\s+").unwrap();
        let slug = whitespace.replace_all(kept.trim(), "_");

        let truncated: String = slug.chars().take(MAX_KEY_LENGTH).collect();
        CacheKey(truncated.trim_end_matches('_').to_string())
    }

    /// Accept a string as a literal key if it already has the derived shape.
    ///
    /// Used for delete-by-key from the shell. Returns `None` for anything
    /// that is not a safe slug, so user input can never escape the cache
    /// directory.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.chars().count() > MAX_KEY_LENGTH {
            return None;
        }
        let safe = raw
            .chars()
            .all(|c| !c.is_uppercase() && (c.is_alphanumeric() || c == '_'));
        if safe {
            Some(CacheKey(raw.to_string()))
        } else {
            None
        }
    }

    /// A phrase made of nothing but punctuation sanitizes to the empty key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
