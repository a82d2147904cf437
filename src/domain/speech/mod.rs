pub mod error;
pub mod service;

pub use error::SpeechServiceError;
pub use service::{AudioSource, PrecacheOutcome, SpeechAudio, SpeechService};
