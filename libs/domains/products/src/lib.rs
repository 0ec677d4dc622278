//! Products Domain
//!
//! Product catalog persistence backed by SQLite, with every store call
//! admitted through a bounded [`database::AdmissionGate`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, one RequestContext per request
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id generation, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + SQLite implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Admission   │  ← At most `capacity` store calls in flight
//! │    Gate     │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::sqlite::{self, SqliteConfig};
//! use database::{AdmissionGate, RequestContext};
//! use domain_products::{CreateProduct, ProductService, SqliteProductRepository, MIGRATOR};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = sqlite::connect_from_config(&SqliteConfig::in_memory()).await?;
//! MIGRATOR.run(&pool).await?;
//!
//! let repository = SqliteProductRepository::new(pool, AdmissionGate::new(4));
//! let service = ProductService::new(repository);
//!
//! let ctx = RequestContext::new();
//! let product = service
//!     .create_product(&ctx, CreateProduct { name: "Coffee".into(), price: 499 })
//!     .await?;
//! assert_eq!(product.price, 499);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

/// Embedded schema migrations for the `products` table
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, PatchProduct, Product, UpdateProduct};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use sqlite::SqliteProductRepository;
