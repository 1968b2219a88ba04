use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionStore>,
    key: Key,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_with(AppConfig::from_env()?).await
    }

    pub async fn init_with(config: AppConfig) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config.database_url).await?;
        crate::db::init_schema(&db).await?;

        // Length is checked in AppConfig::from_env; derive_from panics below
        // 32 bytes.
        let key = Key::derive_from(config.secret_key.as_bytes());

        Ok(Self {
            db,
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::default()),
            key,
        })
    }
}

// Lets SignedCookieJar pull its signing key straight out of the app state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
