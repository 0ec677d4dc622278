//! SQLite test infrastructure
//!
//! Each `TestDatabase` owns a private in-memory database on a single pooled
//! connection, so tests never share state and need no external services.

use database::sqlite::{self, Migrator, SqliteConfig, SqlitePool};

/// In-memory database with the caller's migrations applied
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a fresh database and run `migrator` against it
    ///
    /// # Example
    ///
    /// ```ignore
    /// use test_utils::TestDatabase;
    ///
    /// let db = TestDatabase::new(&domain_products::MIGRATOR).await;
    /// let pool = db.pool().clone();
    /// ```
    pub async fn new(migrator: &Migrator) -> Self {
        Self::with_config(&SqliteConfig::in_memory(), migrator).await
    }

    /// Same as [`TestDatabase::new`] with an explicit pool configuration
    pub async fn with_config(config: &SqliteConfig, migrator: &Migrator) -> Self {
        let pool = sqlite::connect_from_config(config)
            .await
            .expect("Failed to open test database");

        migrator
            .run(&pool)
            .await
            .expect("Failed to run test migrations");

        tracing::debug!(url = config.url(), "Test database ready");

        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool; later queries fail with a storage error
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
