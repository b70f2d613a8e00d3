//! # olaf-db
//!
//! PostgreSQL persistence layer for OLAF.
//!
//! This crate provides:
//! - Connection pool management ([`PoolConfig`], [`create_pool`])
//! - The idempotency ledger over inbound messages (atomic claim)
//! - User resolution (lookup-or-create by phone number)
//! - Inventory record insertion
//!
//! ## Example
//!
//! ```rust,ignore
//! use olaf_db::Database;
//! use olaf_core::InboundMessageRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/olaf").await?;
//!     if db.inbound.try_claim("wamid.abc", "385911234567").await? {
//!         // first delivery — process it
//!     }
//!     Ok(())
//! }
//! ```

pub mod food_items;
pub mod inbound;
pub mod pool;
pub mod users;

// Always compiled so integration tests in dependent crates can reuse the
// default test connection string.
pub mod test_fixtures;

pub use food_items::PgFoodItemRepository;
pub use inbound::PgInboundMessageRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use users::PgUserRepository;

// Re-export core types
pub use olaf_core::*;

use sqlx::PgPool;

/// Embedded schema migrations (enable the `migrations` feature).
#[cfg(feature = "migrations")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Bundle of all repositories over one shared pool.
///
/// Constructed once at startup and injected into the dispatcher; dropping
/// it (or calling [`Database::close`]) releases the pool.
pub struct Database {
    pub inbound: PgInboundMessageRepository,
    pub users: PgUserRepository,
    pub food_items: PgFoodItemRepository,
    pool: PgPool,
}

impl Database {
    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Ok(Self::new(create_pool(database_url).await?))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        Ok(Self::new(create_pool_with_config(database_url, config).await?))
    }

    /// Build the repository bundle over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            inbound: PgInboundMessageRepository::new(pool.clone()),
            users: PgUserRepository::new(pool.clone()),
            food_items: PgFoodItemRepository::new(pool.clone()),
            pool,
        }
    }

    /// The underlying pool (for migrations and health checks).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
