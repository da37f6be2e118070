use anyhow::Result;
use compute::AcademicDataSource;
use moka::future::Cache;
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::auth::SessionStore;
use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Runtime settings.
///
/// Layered lowest to highest: built-in defaults, an optional `schooldash.toml`
/// in the working directory, then environment variables (`DATABASE_URL`,
/// `BIND_ADDRESS`, `DATA_DIR`, `SESSION_TTL_SECS`, a `.env` file is honoured).
/// Command line flags are applied on top with [`Settings::with_overrides`].
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub session_ttl_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_layered(Path::new("schooldash"))
    }

    /// Defaults, then the optional settings file `file` (any format the
    /// config crate knows, extension optional), then the environment
    fn load_layered(file: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("session_ttl_secs", DEFAULT_SESSION_TTL_SECS)?
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;

        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        bind_address: Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Build application state around an existing connection
pub fn app_state_with_db(db: DatabaseConnection, settings: &Settings) -> AppState {
    let cache = Cache::builder()
        .max_capacity(16)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    AppState {
        db,
        cache,
        sessions: SessionStore::new(settings.session_ttl()),
        data: AcademicDataSource::new(&settings.data_dir),
    }
}

/// Initialize application state: connect to the user database and set up caches
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    info!("Reading academic data from {}", settings.data_dir.display());
    Ok(app_state_with_db(db, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Settings {
        Settings {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS as u64,
        }
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let settings = defaults().with_overrides(None, Some("127.0.0.1:8080".to_string()), None);

        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.session_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_load_layers_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("schooldash.toml"),
            "bind_address = \"127.0.0.1:9000\"\ndata_dir = \"from-file\"\n",
        )
        .unwrap();

        // Only this test touches these variables
        unsafe {
            std::env::set_var("DATA_DIR", "/srv/academic");
            std::env::set_var("SESSION_TTL_SECS", "600");
        }
        let loaded = Settings::load_layered(&dir.path().join("schooldash"));
        unsafe {
            std::env::remove_var("DATA_DIR");
            std::env::remove_var("SESSION_TTL_SECS");
        }
        let settings = loaded.unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.data_dir, PathBuf::from("/srv/academic"));
        assert_eq!(settings.session_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_layered(&dir.path().join("schooldash")).unwrap();

        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
    }
}
