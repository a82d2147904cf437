use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicebox::domain::cache::PhraseCache;
use voicebox::domain::speech::SpeechService;
use voicebox::domain::user::UserService;
use voicebox::infrastructure::audio::AudioPlayer;
use voicebox::infrastructure::config::{Config, LogFormat};
use voicebox::infrastructure::repositories::UserRepository;
use voicebox::infrastructure::tts::ElevenLabsGenerator;
use voicebox::shell::Shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        cache_dir = %config.cache_dir.display(),
        users_file = %config.users_file.display(),
        model_id = %config.model_id,
        "Starting voicebox"
    );

    let generator = Arc::new(ElevenLabsGenerator::with_base_url(
        config.api_key.clone(),
        config.model_id.clone(),
        config.base_url.clone(),
    )?);
    let cache = Arc::new(PhraseCache::new(config.cache_dir.clone()));
    let user_repo = Arc::new(UserRepository::new(config.users_file.clone()));

    let user_service = Arc::new(UserService::new(user_repo));
    let speech_service = Arc::new(SpeechService::new(cache, generator));

    // The player owns the output device; dropping it at the end of main
    // releases the device on every exit path.
    let player = AudioPlayer::new()?;

    let shell = Shell::new(speech_service, user_service, player);
    shell.run().await?;

    Ok(())
}

fn init_logging(config: &Config) {
    // Logs go to stderr so they never interleave with the prompt. Default is
    // warnings only; RUST_LOG opens it up.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voicebox=warn".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
