use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use voicebox::domain::cache::PhraseCache;
use voicebox::domain::speech::SpeechService;
use voicebox::domain::user::UserService;
use voicebox::infrastructure::repositories::UserRepository;
use voicebox::infrastructure::tts::{SpeechGenerator, TransportError};

/// Generator double that records every call and answers with a fixed
/// payload.
pub struct RecordingGenerator {
    calls: AtomicUsize,
    payload: Vec<u8>,
}

impl RecordingGenerator {
    pub fn new(payload: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            payload: payload.to_vec(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechGenerator for RecordingGenerator {
    async fn generate(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Generator double that always fails like an unavailable provider.
pub struct FailingGenerator;

#[async_trait]
impl SpeechGenerator for FailingGenerator {
    async fn generate(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, TransportError> {
        Err(TransportError::Api {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Everything a test needs: isolated on-disk state plus wired services.
pub struct TestContext {
    // Keeps the temp directory alive for the lifetime of the test.
    _tmp: TempDir,
    pub cache: Arc<PhraseCache>,
    pub generator: Arc<RecordingGenerator>,
    pub speech: SpeechService,
    pub users: UserService,
}

impl TestContext {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let cache = Arc::new(PhraseCache::new(tmp.path().join("cache")));
        let generator = RecordingGenerator::new(b"mp3-audio");
        let speech = SpeechService::new(cache.clone(), generator.clone());
        let users = UserService::new(Arc::new(UserRepository::new(
            tmp.path().join("users.json"),
        )));
        Self {
            _tmp: tmp,
            cache,
            generator,
            speech,
            users,
        }
    }

    /// Context whose speech service is backed by an arbitrary generator.
    pub fn with_generator(generator: Arc<dyn SpeechGenerator>) -> Self {
        let ctx = Self::new();
        let speech = SpeechService::new(ctx.cache.clone(), generator);
        Self { speech, ..ctx }
    }
}
