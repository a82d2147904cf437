use crate::domain::cache::CacheError;
use crate::error::AppError;
use crate::infrastructure::tts::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] CacheError),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Transport(e) => AppError::ExternalService(e.to_string()),
            SpeechServiceError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}
