//! SQLite implementation of ProductRepository
//!
//! Every call takes exactly one gate permit and holds it for its whole store
//! interaction, a single statement or the update transaction. Store I/O is
//! raced against the caller's context; an abandoned transaction is rolled
//! back when dropped.

use async_trait::async_trait;
use database::sqlite::SqlitePool;
use database::{AdmissionGate, RequestContext};
use tracing::{debug, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

const SELECT_ALL: &str = "SELECT id, name, price FROM products ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, name, price FROM products WHERE id = ?";
const INSERT: &str = "INSERT INTO products (id, name, price) VALUES (?, ?, ?)";
const UPDATE: &str = "UPDATE products SET name = ?, price = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM products WHERE id = ?";

/// SQLite implementation of the ProductRepository
#[derive(Clone, Debug)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
    gate: AdmissionGate,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool, gate: AdmissionGate) -> Self {
        Self { pool, gate }
    }

    /// Get the underlying pool for health checks and shutdown
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }
}

/// Keep the stored value for fields the caller left unset
fn merge(current: Product, incoming: &Product) -> Product {
    let name = incoming.name.trim();
    Product {
        id: current.id,
        name: if name.is_empty() {
            current.name
        } else {
            name.to_string()
        },
        price: if incoming.price <= 0 {
            current.price
        } else {
            incoming.price
        },
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    #[instrument(skip(self, ctx))]
    async fn list(&self, ctx: &RequestContext) -> ProductResult<Vec<Product>> {
        ctx.check()?;
        let _permit = self.gate.acquire(ctx).await?;

        let products = ctx
            .run(sqlx::query_as::<_, Product>(SELECT_ALL).fetch_all(&self.pool))
            .await??;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    #[instrument(skip(self, ctx))]
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> ProductResult<Option<Product>> {
        ctx.check()?;
        let _permit = self.gate.acquire(ctx).await?;

        let product = ctx
            .run(
                sqlx::query_as::<_, Product>(SELECT_BY_ID)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await??;

        Ok(product)
    }

    #[instrument(skip(self, ctx, product), fields(product_id = %product.id))]
    async fn create(&self, ctx: &RequestContext, product: &Product) -> ProductResult<()> {
        ctx.check()?;
        let _permit = self.gate.acquire(ctx).await?;

        let result = ctx
            .run(
                sqlx::query(INSERT)
                    .bind(&product.id)
                    .bind(&product.name)
                    .bind(product.price)
                    .execute(&self.pool),
            )
            .await?;

        match result {
            Ok(_) => {
                debug!("Inserted product row");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ProductError::AlreadyExists(product.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, ctx, product), fields(product_id = %product.id))]
    async fn update(&self, ctx: &RequestContext, product: &Product) -> ProductResult<()> {
        ctx.check()?;
        let _permit = self.gate.acquire(ctx).await?;

        let transaction = async {
            // Take the write lock up front; a WAL read lock cannot be upgraded under contention
            let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

            let current = sqlx::query_as::<_, Product>(SELECT_BY_ID)
                .bind(&product.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| ProductError::NotFound(product.id.clone()))?;

            let merged = merge(current, product);
            let result = sqlx::query(UPDATE)
                .bind(&merged.name)
                .bind(merged.price)
                .bind(&merged.id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(ProductError::NotFound(product.id.clone()));
            }

            tx.commit().await?;
            debug!(name = %merged.name, price = merged.price, "Updated product row");
            Ok::<(), ProductError>(())
        };

        ctx.run(transaction).await?
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &RequestContext, id: &str) -> ProductResult<()> {
        ctx.check()?;
        let _permit = self.gate.acquire(ctx).await?;

        let result = ctx
            .run(sqlx::query(DELETE).bind(id).execute(&self.pool))
            .await??;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        debug!("Deleted product row");
        Ok(())
    }
}
