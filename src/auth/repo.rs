use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::auth::repo_types::User;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by id. Used when resolving a session back to its user.
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password. Fails with a unique
    /// violation if the email is already taken; callers map that to the
    /// duplicate-account path.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
