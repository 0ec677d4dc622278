use async_trait::async_trait;
use database::RequestContext;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Every method takes the caller's [`RequestContext`] and must fail with
/// `Cancelled`/`DeadlineExceeded` instead of touching the store once it has
/// fired.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id; empty when the store is empty
    async fn list(&self, ctx: &RequestContext) -> ProductResult<Vec<Product>>;

    /// Absence is `Ok(None)`, not an error
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> ProductResult<Option<Product>>;

    /// Insert a new row. A duplicate id fails with `AlreadyExists`.
    async fn create(&self, ctx: &RequestContext, product: &Product) -> ProductResult<()>;

    /// Overwrite the row with `product.id` in one transaction.
    ///
    /// A blank name or non-positive price in `product` keeps the stored
    /// value. Fails with `NotFound` if the row is absent.
    async fn update(&self, ctx: &RequestContext, product: &Product) -> ProductResult<()>;

    /// Fails with `NotFound` if no row was deleted
    async fn delete(&self, ctx: &RequestContext, id: &str) -> ProductResult<()>;
}
