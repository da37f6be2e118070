use anyhow::Result;
use tracing::{error, info};

use super::init_database;
use crate::auth;

/// Add a user to the store, creating the schema first when needed
pub async fn create_user(database_url: &str, username: &str, password: &str) -> Result<()> {
    let db = init_database(database_url).await?;

    match auth::create_user(&db, username, password).await {
        Ok(user) => {
            info!("User '{}' created with ID {}", user.username, user.id);
            Ok(())
        }
        Err(e) => {
            error!("Failed to create user '{}': {}", username, e);
            Err(e.into())
        }
    }
}
