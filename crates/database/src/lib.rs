//! SQLite persistence layer for the outreach reminder engine.
//!
//! This crate provides async database operations for campaigns, runs, leads,
//! reminder progress and the delivery outbox using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, reminder_state, Stage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:outreach.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Look at one page of leads due for their first reminder
//!     let query = reminder_state::DueQuery {
//!         campaign_id: "spring-launch",
//!         stage: Stage::Initial,
//!         due_before: "2025-04-01T00:00:00Z",
//!         after_id: 0,
//!         limit: 100,
//!     };
//!     let due = reminder_state::list_due(db.pool(), &query).await?;
//!     println!("{} leads due", due.len());
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod campaign;
pub mod campaign_run;
pub mod company;
pub mod error;
pub mod lead;
pub mod models;
pub mod outbound;
pub mod outbox;
pub mod product;
pub mod reminder_state;
pub mod schedule;
pub mod stage;
pub mod time;

pub use error::{DatabaseError, Result};
pub use models::{
    Account, Campaign, CampaignRun, Channel, Company, EngagementFlag, Lead, NewOutboxItem,
    OutboundMessage, OutboxItem, Product, ProductBenefit, ReminderState, RunStatus,
    ScheduleEntry, MAX_CADENCE_DAYS,
};
pub use reminder_state::{AdvanceOutcome, DueQuery};
pub use stage::{Stage, MAX_REMINDERS};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Sized for one sweep's concurrent lead workers plus headroom.
    const DEFAULT_POOL_SIZE: u32 = 16;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/outreach.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
