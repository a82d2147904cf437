use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model_id: String,
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub users_file: PathBuf,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("VOICEBOX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let config = Config {
            api_key: env::var("ELEVENLABS_API_KEY")
                .map_err(|_| "ELEVENLABS_API_KEY environment variable not set")?,
            model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| "eleven_multilingual_v2".to_string()),
            base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| "https://api.elevenlabs.io".to_string()),
            cache_dir: env::var("VOICEBOX_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("cache")),
            users_file: env::var("VOICEBOX_USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("users.json")),
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
        };

        Ok(config)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voicebox")
}
