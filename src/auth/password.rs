use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use model::entities::user;
use rand_core::OsRng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{debug, info, instrument, warn};

use super::AuthError;

/// Hash a password with a fresh salt, returning the PHC string
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::InvalidHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Look up `username` and check `password` against its stored hash.
///
/// Returns `Ok(None)` for an unknown user or a wrong password. Verification
/// runs on the blocking pool.
#[instrument(skip(db, password))]
pub async fn verify_credentials(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>, AuthError> {
    let Some(user) = user::Entity::find_by_username(username).one(db).await? else {
        debug!("Unknown username");
        return Ok(None);
    };

    let password = password.to_string();
    let hash = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

    if matches {
        Ok(Some(user))
    } else {
        warn!("Wrong password for user {}", user.id);
        Ok(None)
    }
}

/// Store a new user with a hashed password
#[instrument(skip(db, password))]
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, AuthError> {
    let owned = password.to_string();
    let hash = tokio::task::spawn_blocking(move || hash_password(&owned)).await??;

    let created = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(hash),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created user {} with ID {}", created.username, created.id);
    Ok(created)
}
