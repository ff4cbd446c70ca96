use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if the Spotify credentials are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Optional TTF override for the regular face; system paths are probed
    /// when unset.
    pub font_path: Option<String>,
    /// Optional TTF override for the bold face.
    pub font_bold_path: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            spotify_client_id: require_env("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: require_env("SPOTIFY_CLIENT_SECRET")?,
            font_path: std::env::var("POSTER_FONT_PATH").ok(),
            font_bold_path: std::env::var("POSTER_FONT_BOLD_PATH").ok(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
