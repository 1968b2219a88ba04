use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Minimum length for the cookie-signing secret. Anything shorter makes the
/// signed session cookie forgeable in practice.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub secret_key: String,
    pub download_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:users.db".into());
        let secret_key = std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
        anyhow::ensure!(
            secret_key.len() >= MIN_SECRET_KEY_LEN,
            "SECRET_KEY must be at least {} bytes",
            MIN_SECRET_KEY_LEN
        );
        let download_dir = std::env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("files"));
        Ok(Self {
            database_url,
            secret_key,
            download_dir,
        })
    }
}
