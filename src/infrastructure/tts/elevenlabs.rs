use std::time::Duration;

use async_trait::async_trait;

use super::generator::{SpeechGenerator, TransportError};

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// ElevenLabs has generous limits; this bounds a hung connection, not the
/// synthesis itself.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// ElevenLabs text-to-speech client.
///
/// Calls `POST /v1/text-to-speech/{voice_id}` and returns the MP3 response
/// body. The base URL is injectable so tests can point it at a mock server.
pub struct ElevenLabsGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model_id: String,
}

impl ElevenLabsGenerator {
    pub fn new(api_key: String, model_id: String) -> Result<Self, TransportError> {
        Self::with_base_url(api_key, model_id, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model_id: String,
        base_url: String,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model_id,
        })
    }
}

#[async_trait]
impl SpeechGenerator for ElevenLabsGenerator {
    async fn generate(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, TransportError> {
        #[derive(serde::Serialize)]
        struct SynthesisRequest<'a> {
            text: &'a str,
            model_id: &'a str,
        }

        let url = format!("{}/v1/text-to-speech/{}", self.base_url, voice_id);

        tracing::info!(
            voice_id = voice_id,
            model_id = %self.model_id,
            text_length = text.len(),
            "Calling ElevenLabs TTS API"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&SynthesisRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status,
                body = %body,
                voice_id = voice_id,
                "ElevenLabs TTS API call failed"
            );
            return Err(TransportError::Api { status, body });
        }

        let audio = response.bytes().await?;
        tracing::debug!(
            audio_size = audio.len(),
            "ElevenLabs audio received successfully"
        );
        Ok(audio.to_vec())
    }
}
