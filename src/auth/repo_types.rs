use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // unique user ID
    pub email: String,              // unique lookup key for login/registration
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 PHC string, never the plaintext
    pub name: String,               // display name shown on the protected page
    pub created_at: OffsetDateTime, // creation timestamp
}
