//! Startup seeding of the demo account.

use portcullis_db::models::user::CreateUser;
use portcullis_db::repositories::UserRepo;
use portcullis_db::DbPool;

use crate::auth::password::hash_password;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_USERNAME: &str = "demo_user";
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Ensure the demo account exists.
///
/// Returns `true` when the account was created, `false` when a user with the
/// demo email or username was already present.
pub async fn seed_demo_user(pool: &DbPool) -> Result<bool, SeedError> {
    if UserRepo::exists_by_email_or_username(pool, DEMO_EMAIL, DEMO_USERNAME).await? {
        tracing::debug!("Demo user already present");
        return Ok(false);
    }

    let password_hash = hash_password(DEMO_PASSWORD).map_err(SeedError::Hash)?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: DEMO_EMAIL.to_string(),
            username: DEMO_USERNAME.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = DEMO_EMAIL, "Demo user created");
    Ok(true)
}
