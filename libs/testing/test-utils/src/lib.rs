//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestDatabase`: private in-memory SQLite database with migrations applied
//! - `RecordingGateMetrics`: admission gate metrics sink that tracks peak usage
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_sqlite_test() {
//!     let db = TestDatabase::new(&domain_products::MIGRATOR).await;
//!     let builder = TestDataBuilder::from_test_name("my_sqlite_test");
//!
//!     let name = builder.product_name("main");
//!     let price = builder.price(0);
//! }
//! ```

use uuid::Uuid;

mod metrics;
mod sqlite;

pub use metrics::RecordingGateMetrics;
pub use sqlite::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// An id that no generated product will ever use
    pub fn unknown_id(&self) -> String {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes).to_string()
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("product", "main"), "test-product-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn product_name(&self, suffix: &str) -> String {
        self.name("product", suffix)
    }

    /// A positive price derived from the seed; distinct for each `index` below 1000
    pub fn price(&self, index: u32) -> i64 {
        100 + (self.seed % 9_000) as i64 * 1_000 + i64::from(index % 1_000)
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::collections::HashSet;
    use std::fmt::Debug;
    use std::hash::Hash;

    /// Assert that no item appears twice
    pub fn assert_distinct<T, I>(items: I, context: &str)
    where
        T: Eq + Hash + Debug,
        I: IntoIterator<Item = T>,
    {
        let mut seen = HashSet::new();
        for item in items {
            if let Some(duplicate) = seen.replace(item) {
                panic!("{}: duplicate item {:?}", context, duplicate);
            }
        }
    }
}
