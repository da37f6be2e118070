#[cfg(test)]
pub mod test_utils {
    use crate::auth::create_user;
    use crate::config::{Settings, app_state_with_db};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use std::path::PathBuf;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_USERNAME: &str = "test_user";
    pub const TEST_PASSWORD: &str = "correct horse battery staple";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Settings pointing at the fixture data shipped with the crate
    pub fn test_settings() -> Settings {
        Settings {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            session_ttl_secs: 3600,
        }
    }

    /// Create AppState for testing with one known user
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        create_user(&db, TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("Failed to create test user");

        app_state_with_db(db, &test_settings())
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _guard = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }

    /// Test server that keeps cookies between requests
    pub async fn setup_test_server() -> TestServer {
        let mut server = TestServer::new(setup_test_app().await).unwrap();
        server.do_save_cookies();
        server
    }

    /// Test server with a logged in session
    pub async fn setup_logged_in_server() -> TestServer {
        let server = setup_test_server().await;
        server
            .post("/login")
            .form(&[("username", TEST_USERNAME), ("password", TEST_PASSWORD)])
            .await
            .assert_status(axum::http::StatusCode::SEE_OTHER);
        server
    }
}
