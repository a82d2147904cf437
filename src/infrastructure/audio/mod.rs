use std::io::Cursor;
use std::sync::{Arc, Mutex};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::AppError;

/// Failure in the local playback path.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("audio device unavailable: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("audio output failed: {0}")]
    Output(#[from] rodio::PlayError),

    #[error("audio data not decodable: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

impl From<PlaybackError> for AppError {
    fn from(err: PlaybackError) -> Self {
        AppError::Playback(err.to_string())
    }
}

/// MP3 playback on the default output device.
///
/// `play` blocks until the clip finishes or `stop` cuts it from another
/// control path. The device is acquired once in `new` and released when the
/// player is dropped, on every exit path.
pub struct AudioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    current: Arc<Mutex<Option<Arc<Sink>>>>,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, PlaybackError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            current: Arc::new(Mutex::new(None)),
        })
    }

    /// Decode and play one MP3 clip, blocking until playback ends.
    pub fn play(&self, audio: &[u8]) -> Result<(), PlaybackError> {
        let source = Decoder::new(Cursor::new(audio.to_vec()))?;
        let sink = Arc::new(Sink::try_new(&self.handle)?);
        sink.append(source);

        *self.current.lock().unwrap() = Some(sink.clone());
        sink.sleep_until_end();
        self.current.lock().unwrap().take();
        Ok(())
    }

    /// Stop the clip currently playing, if any. `play` returns immediately
    /// after the sink is stopped.
    pub fn stop(&self) {
        if let Some(sink) = self.current.lock().unwrap().take() {
            sink.stop();
        }
    }
}
