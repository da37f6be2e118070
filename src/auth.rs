//! Username/password authentication: password hashing, server-side sessions
//! and the gate that every request passes through.

pub mod gate;
pub mod password;
pub mod session;

pub use gate::require_login;
pub use password::{create_user, verify_credentials};
pub use session::{Session, SessionStore};

use thiserror::Error;

/// Error types for authentication
#[derive(Error, Debug)]
pub enum AuthError {
    /// Error from the user store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Hashing a new password failed
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// A stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),

    /// The blocking hashing task did not complete
    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
