//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{AppError, ErrorResponse, ValidatedJson};
use database::RequestContext;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;

use crate::models::{CreateProduct, PatchProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct, PatchProduct, ErrorResponse)),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

struct ProductsState<R: ProductRepository> {
    service: ProductService<R>,
    request_timeout: Duration,
}

impl<R: ProductRepository> ProductsState<R> {
    /// Every request gets its own deadline
    fn context(&self) -> RequestContext {
        RequestContext::new().with_timeout(self.request_timeout)
    }
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    request_timeout: Duration,
) -> Router {
    let state = Arc::new(ProductsState {
        service,
        request_timeout,
    });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(state)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products ordered by id", body = Vec<Product>),
        (status = 408, description = "Request timed out", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.service.list_products(&state.context()).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid product", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.service.create_product(&state.context(), input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    match state.service.get_product(&state.context(), &id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::NotFound(format!("Product {} not found", id))),
    }
}

/// Replace a product's name and price
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid product or id mismatch", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .service
        .update_product(&state.context(), &id, input)
        .await?;
    Ok(Json(product))
}

/// Change only the provided fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = PatchProduct,
    responses(
        (status = 200, description = "Product patched", body = Product),
        (status = 400, description = "Empty patch or invalid field", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<PatchProduct>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .service
        .patch_product(&state.context(), &id, input)
        .await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.service.delete_product(&state.context(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
