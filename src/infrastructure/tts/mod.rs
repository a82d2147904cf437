pub mod elevenlabs;
pub mod generator;

pub use elevenlabs::ElevenLabsGenerator;
pub use generator::{SpeechGenerator, TransportError};
