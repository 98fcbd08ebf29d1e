use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "notes.db";
pub const DEFAULT_API_URL: &str = "https://api.x.ai/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Path of the SQLite database file
    pub db_path: String,
    /// Chat-completion endpoint used for summarization
    pub api_url: String,
    /// Credential for the summarization endpoint. Its absence only matters
    /// when a summarization request arrives, not at startup.
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT value '{raw}', falling back to {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let db_path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        let api_url = env::var("XAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = env::var("XAI_API_KEY").ok().filter(|key| !key.is_empty());

        Self {
            port,
            db_path,
            api_url,
            api_key,
        }
    }
}
