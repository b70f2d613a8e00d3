//! Idempotency ledger over inbound messages.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use olaf_core::{Error, InboundMessageRepository, Result};

/// PostgreSQL inbound-message repository.
pub struct PgInboundMessageRepository {
    pool: PgPool,
}

impl PgInboundMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InboundMessageRepository for PgInboundMessageRepository {
    /// Claim a message id with a single insert-if-absent statement.
    ///
    /// `ON CONFLICT DO NOTHING RETURNING true` yields a row only for the
    /// insert that won; a concurrent redelivery of the same id sees no
    /// row and reports the duplicate. No check-then-insert window exists.
    async fn try_claim(&self, message_id: &str, sender: &str) -> Result<bool> {
        let row = sqlx::query(
            "INSERT INTO inbound_messages (message_id, phone_number)
             VALUES ($1, $2)
             ON CONFLICT (message_id) DO NOTHING
             RETURNING true AS claimed",
        )
        .bind(message_id)
        .bind(sender)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let claimed = row.map(|r| r.get::<bool, _>("claimed")).unwrap_or(false);
        debug!(
            subsystem = "db",
            component = "inbound",
            op = "try_claim",
            message_id,
            claimed,
            "Message claim attempt"
        );
        Ok(claimed)
    }
}
