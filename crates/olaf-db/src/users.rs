//! User resolution keyed by sender phone number.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use olaf_core::{Error, Result, UserRepository};

/// PostgreSQL user repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Look up a user by phone number, creating them on first contact.
    ///
    /// Single upsert statement: two concurrent first messages from the
    /// same sender resolve to the same row instead of racing a SELECT
    /// against an INSERT. The no-op `DO UPDATE` makes `RETURNING id`
    /// yield a row on both paths; an existing display name is kept.
    async fn resolve(&self, sender: &str, display_name: Option<&str>) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO users (phone_number, user_name)
             VALUES ($1, $2)
             ON CONFLICT (phone_number)
             DO UPDATE SET user_name = COALESCE(users.user_name, EXCLUDED.user_name)
             RETURNING id",
        )
        .bind(sender)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let user_id: i64 = row.get("id");
        debug!(
            subsystem = "db",
            component = "users",
            op = "resolve",
            user_id,
            "Resolved sender to user"
        );
        Ok(user_id)
    }
}
