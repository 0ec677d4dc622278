//! Product Service - Business logic layer

use database::RequestContext;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PatchProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Product service providing business logic operations
///
/// Validation and existence checks happen here, before any mutating
/// repository call. Every method checks the context first and passes it on
/// to each repository call.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    id_generator: IdGenerator,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            id_generator: Arc::new(|| uuid::Uuid::new_v4().to_string()),
        }
    }

    /// Replace the id source used by `create_product`
    pub fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.id_generator = Arc::new(generator);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// List all products
    #[instrument(skip(self, ctx))]
    pub async fn list_products(&self, ctx: &RequestContext) -> ProductResult<Vec<Product>> {
        ctx.check()?;
        self.repository.list(ctx).await.inspect_err(report)
    }

    /// Get a product by ID; `None` when absent
    #[instrument(skip(self, ctx))]
    pub async fn get_product(&self, ctx: &RequestContext, id: &str) -> ProductResult<Option<Product>> {
        ctx.check()?;
        self.repository.get_by_id(ctx, id).await.inspect_err(report)
    }

    /// Create a new product under a fresh server-generated id
    #[instrument(skip(self, ctx, input), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        input: CreateProduct,
    ) -> ProductResult<Product> {
        ctx.check()?;
        input.validate()?;

        let product = loop {
            ctx.check()?;
            let id = (self.id_generator)();
            if self.repository.get_by_id(ctx, &id).await.inspect_err(report)?.is_none() {
                break Product::new(id, input.name.trim(), input.price);
            }
            debug!(id = %id, "Generated id already in use, retrying");
        };

        self.repository
            .create(ctx, &product)
            .await
            .inspect_err(report)?;

        info!(product_id = %product.id, price = product.price, "Product created");
        Ok(product)
    }

    /// Replace a product's name and price
    #[instrument(skip(self, ctx, input))]
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        ctx.check()?;
        input.validate()?;

        if let Some(body_id) = input.id.as_deref().filter(|body_id| !body_id.is_empty()) {
            if body_id != id {
                return Err(ProductError::IdMismatch {
                    path: id.to_string(),
                    body: body_id.to_string(),
                });
            }
        }

        self.require(ctx, id).await?;

        let product = Product::new(id, input.name.trim(), input.price);
        self.repository
            .update(ctx, &product)
            .await
            .inspect_err(report)?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Change only the fields present in `input`
    #[instrument(skip(self, ctx, input))]
    pub async fn patch_product(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: PatchProduct,
    ) -> ProductResult<Product> {
        ctx.check()?;
        if input.is_empty() {
            return Err(ProductError::EmptyPatch);
        }
        input.validate()?;

        let current = self.require(ctx, id).await?;
        let merged = input.apply_to(&current);

        self.repository
            .update(ctx, &merged)
            .await
            .inspect_err(report)?;

        info!(product_id = %id, "Product patched");
        Ok(merged)
    }

    /// Delete a product
    #[instrument(skip(self, ctx))]
    pub async fn delete_product(&self, ctx: &RequestContext, id: &str) -> ProductResult<()> {
        ctx.check()?;
        if id.is_empty() {
            return Err(ProductError::InvalidProduct("id must not be empty".to_string()));
        }

        self.require(ctx, id).await?;
        self.repository.delete(ctx, id).await.inspect_err(report)?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn require(&self, ctx: &RequestContext, id: &str) -> ProductResult<Product> {
        self.repository
            .get_by_id(ctx, id)
            .await
            .inspect_err(report)?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }
}

fn report(err: &ProductError) {
    match err {
        ProductError::Cancelled | ProductError::DeadlineExceeded => {
            warn!(error = %err, "Repository call abandoned")
        }
        ProductError::Storage(_) => error!(error = %err, "Repository call failed"),
        _ => {}
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            id_generator: Arc::clone(&self.id_generator),
        }
    }
}

impl<R: ProductRepository> fmt::Debug for ProductService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use std::sync::Mutex;

    fn coffee() -> Product {
        Product::new("p-1", "Coffee", 499)
    }

    fn sequence(ids: &[&str]) -> impl Fn() -> String + Send + Sync + 'static {
        let ids = Mutex::new(ids.iter().rev().map(|id| id.to_string()).collect::<Vec<_>>());
        move || ids.lock().unwrap().pop().unwrap()
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_before_store() {
        let service = ProductService::new(MockProductRepository::new());
        let ctx = RequestContext::new();

        for (name, price) in [("", 100), ("   ", 100), ("Coffee", 0), ("Coffee", -3)] {
            let result = service
                .create_product(
                    &ctx,
                    CreateProduct {
                        name: name.to_string(),
                        price,
                    },
                )
                .await;
            assert!(matches!(result, Err(ProductError::InvalidProduct(_))), "{name}/{price}");
        }
    }

    #[tokio::test]
    async fn test_create_product_retries_on_id_collision() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .withf(|_, id| id == "taken")
            .times(1)
            .returning(|_, _| Ok(Some(Product::new("taken", "Tea", 250))));
        repo.expect_get_by_id()
            .withf(|_, id| id == "fresh")
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create()
            .withf(|_, p| p == &Product::new("fresh", "Coffee", 499))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProductService::new(repo).with_id_generator(sequence(&["taken", "fresh"]));
        let created = service
            .create_product(
                &RequestContext::new(),
                CreateProduct {
                    name: " Coffee ".to_string(),
                    price: 499,
                },
            )
            .await
            .unwrap();

        assert_eq!(created, Product::new("fresh", "Coffee", 499));
    }

    #[tokio::test]
    async fn test_get_product_absent_is_none() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_, _| Ok(None));

        let service = ProductService::new(repo);
        let found = service.get_product(&RequestContext::new(), "nope").await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_update_product_id_mismatch() {
        let service = ProductService::new(MockProductRepository::new());
        let result = service
            .update_product(
                &RequestContext::new(),
                "p-1",
                UpdateProduct {
                    id: Some("p-2".to_string()),
                    name: "Coffee".to_string(),
                    price: 499,
                },
            )
            .await;

        assert_eq!(
            result.unwrap_err(),
            ProductError::IdMismatch {
                path: "p-1".to_string(),
                body: "p-2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_product_forces_path_id() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_, _| Ok(Some(coffee())));
        repo.expect_update()
            .withf(|_, p| p == &Product::new("p-1", "Espresso", 350))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProductService::new(repo);
        let updated = service
            .update_product(
                &RequestContext::new(),
                "p-1",
                UpdateProduct {
                    id: Some(String::new()),
                    name: "Espresso".to_string(),
                    price: 350,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, "p-1");
    }

    #[tokio::test]
    async fn test_update_missing_product_never_writes() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_, _| Ok(None));
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(
                &RequestContext::new(),
                "ghost",
                UpdateProduct {
                    id: None,
                    name: "Coffee".to_string(),
                    price: 499,
                },
            )
            .await;

        assert_eq!(result.unwrap_err(), ProductError::NotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_patch_product_empty_and_invalid() {
        let service = ProductService::new(MockProductRepository::new());
        let ctx = RequestContext::new();

        assert_eq!(
            service
                .patch_product(&ctx, "p-1", PatchProduct::default())
                .await
                .unwrap_err(),
            ProductError::EmptyPatch
        );

        let zero_price = PatchProduct {
            name: None,
            price: Some(0),
        };
        assert!(matches!(
            service.patch_product(&ctx, "p-1", zero_price).await,
            Err(ProductError::InvalidProduct(_))
        ));
    }

    #[tokio::test]
    async fn test_patch_product_merges_onto_stored_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_, _| Ok(Some(coffee())));
        repo.expect_update()
            .withf(|_, p| p == &Product::new("p-1", "Coffee", 599))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProductService::new(repo);
        let patched = service
            .patch_product(
                &RequestContext::new(),
                "p-1",
                PatchProduct {
                    name: None,
                    price: Some(599),
                },
            )
            .await
            .unwrap();

        assert_eq!(patched, Product::new("p-1", "Coffee", 599));
    }

    #[tokio::test]
    async fn test_delete_product_requires_id_and_existence() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_, _| Ok(None));
        repo.expect_delete().never();

        let service = ProductService::new(repo);
        let ctx = RequestContext::new();

        assert!(matches!(
            service.delete_product(&ctx, "").await,
            Err(ProductError::InvalidProduct(_))
        ));
        assert_eq!(
            service.delete_product(&ctx, "  ").await.unwrap_err(),
            ProductError::NotFound("  ".to_string())
        );
        assert_eq!(
            service.delete_product(&ctx, "ghost").await.unwrap_err(),
            ProductError::NotFound("ghost".to_string())
        );
    }

    #[tokio::test]
    async fn test_precancelled_context_touches_nothing() {
        // No expectations: any repository call panics
        let service = ProductService::new(MockProductRepository::new());
        let ctx = RequestContext::new();
        ctx.cancel();

        let valid_update = UpdateProduct {
            id: None,
            name: "Coffee".to_string(),
            price: 499,
        };
        let valid_patch = PatchProduct {
            name: Some("Tea".to_string()),
            price: None,
        };
        let valid_create = CreateProduct {
            name: "Coffee".to_string(),
            price: 499,
        };

        assert_eq!(service.list_products(&ctx).await.unwrap_err(), ProductError::Cancelled);
        assert_eq!(service.get_product(&ctx, "p-1").await.unwrap_err(), ProductError::Cancelled);
        assert_eq!(
            service.create_product(&ctx, valid_create).await.unwrap_err(),
            ProductError::Cancelled
        );
        assert_eq!(
            service.update_product(&ctx, "p-1", valid_update).await.unwrap_err(),
            ProductError::Cancelled
        );
        assert_eq!(
            service.patch_product(&ctx, "p-1", valid_patch).await.unwrap_err(),
            ProductError::Cancelled
        );
        assert_eq!(service.delete_product(&ctx, "p-1").await.unwrap_err(), ProductError::Cancelled);
    }

    #[tokio::test]
    async fn test_repository_deadline_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().returning(|_| Err(ProductError::DeadlineExceeded));

        let service = ProductService::new(repo);
        assert_eq!(
            service.list_products(&RequestContext::new()).await.unwrap_err(),
            ProductError::DeadlineExceeded
        );
    }
}
