use async_trait::async_trait;

/// Typed failure from the speech generator.
///
/// `Http` covers transport-level failures (connect, TLS, timeout); `Api` is
/// a response the service refused (bad voice id, auth, quota). The cache
/// core propagates both unchanged, retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("TTS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS service returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Collaborator performing the actual text-to-speech synthesis.
/// Abstracts the underlying TTS provider.
///
/// Implementations are responsible for:
/// - Provider-specific endpoint shape and authentication
/// - Emitting one complete MP3 document ready for playback or caching
///
/// # Errors
/// Returns [`TransportError`] if synthesis fails or the provider is
/// unavailable.
#[async_trait]
pub trait SpeechGenerator: Send + Sync {
    async fn generate(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, TransportError>;
}
