use std::sync::Arc;

use crate::domain::cache::{CacheKey, PhraseCache};
use crate::infrastructure::tts::SpeechGenerator;

use super::error::SpeechServiceError;

/// Where the audio for a spoken phrase came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSource {
    Cache,
    Generated,
}

/// Result of a speak request: playable bytes plus cache metadata.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub key: CacheKey,
    pub source: AudioSource,
}

/// Outcome of warming the cache for a phrase ahead of playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecacheOutcome {
    AlreadyCached(CacheKey),
    Generated(CacheKey),
}

/// Fetch-or-generate orchestrator.
///
/// Looks up each phrase in the per-user cache and only calls the generator
/// on a miss, then persists the result. Under sequential use each distinct
/// (user, key) pair triggers at most one generation call. This is a
/// point-in-time check, not a cross-process lock; a concurrent session could
/// generate the same phrase twice, ending in a benign overwrite.
pub struct SpeechService {
    cache: Arc<PhraseCache>,
    generator: Arc<dyn SpeechGenerator>,
}

impl SpeechService {
    pub fn new(cache: Arc<PhraseCache>, generator: Arc<dyn SpeechGenerator>) -> Self {
        Self { cache, generator }
    }

    /// Return audio for a phrase, generating and caching it on first use.
    ///
    /// Cache hits never touch the network. Transport and storage failures
    /// propagate unchanged; nothing is cached on a failed generation.
    pub async fn speak(
        &self,
        user_id: &str,
        phrase: &str,
        voice_id: &str,
    ) -> Result<SpeechAudio, SpeechServiceError> {
        let key = self.derive_key(user_id, phrase);

        if self.cache.exists(user_id, &key) {
            if let Some(bytes) = self.cache.get(user_id, &key)? {
                tracing::info!(
                    user_id = user_id,
                    key = %key,
                    audio_size = bytes.len(),
                    "Cache hit, replaying stored audio"
                );
                return Ok(SpeechAudio {
                    bytes,
                    key,
                    source: AudioSource::Cache,
                });
            }
            // Entry vanished between the check and the read; regenerate.
        }

        tracing::info!(
            user_id = user_id,
            key = %key,
            text_length = phrase.len(),
            "Cache miss, generating speech"
        );
        let bytes = self.generator.generate(phrase, voice_id).await?;
        let location = self.cache.put(user_id, &key, &bytes)?;
        tracing::info!(
            user_id = user_id,
            key = %key,
            audio_size = bytes.len(),
            location = %location.display(),
            "Generated audio cached"
        );

        Ok(SpeechAudio {
            bytes,
            key,
            source: AudioSource::Generated,
        })
    }

    /// Warm the cache for a phrase without returning audio for playback.
    /// Short-circuits on a hit instead of re-generating.
    pub async fn precache(
        &self,
        user_id: &str,
        phrase: &str,
        voice_id: &str,
    ) -> Result<PrecacheOutcome, SpeechServiceError> {
        let key = self.derive_key(user_id, phrase);

        if self.cache.exists(user_id, &key) {
            return Ok(PrecacheOutcome::AlreadyCached(key));
        }

        let bytes = self.generator.generate(phrase, voice_id).await?;
        self.cache.put(user_id, &key, &bytes)?;
        tracing::info!(user_id = user_id, key = %key, "Phrase pre-cached");
        Ok(PrecacheOutcome::Generated(key))
    }

    /// Keys cached for a user, sorted.
    pub fn list_cached(&self, user_id: &str) -> Result<Vec<CacheKey>, SpeechServiceError> {
        Ok(self.cache.list(user_id)?)
    }

    /// Remove one cached phrase. `true` when an entry was deleted.
    pub fn delete_cached(
        &self,
        user_id: &str,
        key: &CacheKey,
    ) -> Result<bool, SpeechServiceError> {
        Ok(self.cache.delete(user_id, key)?)
    }

    fn derive_key(&self, user_id: &str, phrase: &str) -> CacheKey {
        let key = CacheKey::derive(phrase);
        if key.is_empty() {
            tracing::warn!(
                user_id = user_id,
                phrase = phrase,
                "Phrase sanitized to an empty cache key; all such phrases share one entry"
            );
        }
        key
    }
}
