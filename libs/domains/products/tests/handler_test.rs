//! HTTP-level tests for the products router

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use axum_helpers::ErrorResponse;
use database::AdmissionGate;
use domain_products::{handlers, Product, ProductService, SqliteProductRepository, MIGRATOR};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use test_utils::TestDatabase;
use tower::ServiceExt;

async fn app() -> (TestDatabase, Router) {
    let db = TestDatabase::new(&MIGRATOR).await;
    let repository = SqliteProductRepository::new(db.pool().clone(), AdmissionGate::new(4));
    let router = handlers::router(ProductService::new(repository), Duration::from_secs(5));
    (db, router)
}

fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, axum::body::Bytes) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn json<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_create_returns_created_product() {
    let (_db, router) = app().await;

    let (status, body) = send(
        &router,
        request(Method::POST, "/", Some(r#"{"name":"Coffee","price":499}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let product: Product = json(&body);
    assert_eq!(product.name, "Coffee");
    assert_eq!(product.price, 499);
    assert!(!product.id.is_empty());
}

#[tokio::test]
async fn test_create_with_invalid_price_is_bad_request() {
    let (_db, router) = app().await;

    let (status, body) = send(
        &router,
        request(Method::POST, "/", Some(r#"{"name":"Coffee","price":0}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json(&body);
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let (_db, router) = app().await;

    let (status, body) = send(&router, request(Method::GET, "/nope", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = json(&body);
    assert!(error.message.contains("nope"));
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let (_db, router) = app().await;

    let (_, body) = send(
        &router,
        request(Method::POST, "/", Some(r#"{"name":"Coffee","price":499}"#)),
    )
    .await;
    let created: Product = json(&body);
    let uri = format!("/{}", created.id);

    let (status, body) = send(
        &router,
        request(Method::PATCH, &uri, Some(r#"{"price":599}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json::<Product>(&body), Product::new(&created.id, "Coffee", 599));

    let (status, body) = send(
        &router,
        request(Method::PUT, &uri, Some(r#"{"name":"Decaf","price":450}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json::<Product>(&body), Product::new(&created.id, "Decaf", 450));

    let (status, body) = send(&router, request(Method::GET, "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json::<Vec<Product>>(&body),
        vec![Product::new(&created.id, "Decaf", 450)]
    );

    let (status, _) = send(&router, request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_patch_is_bad_request() {
    let (_db, router) = app().await;
    let (_, body) = send(
        &router,
        request(Method::POST, "/", Some(r#"{"name":"Coffee","price":499}"#)),
    )
    .await;
    let created: Product = json(&body);

    let (status, body) = send(
        &router,
        request(Method::PATCH, &format!("/{}", created.id), Some("{}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json(&body);
    assert!(error.message.contains("at least one field"));
}

#[tokio::test]
async fn test_put_with_mismatched_body_id_is_bad_request() {
    let (_db, router) = app().await;
    let (_, body) = send(
        &router,
        request(Method::POST, "/", Some(r#"{"name":"Coffee","price":499}"#)),
    )
    .await;
    let created: Product = json(&body);

    let (status, _) = send(
        &router,
        request(
            Method::PUT,
            &format!("/{}", created.id),
            Some(r#"{"id":"other","name":"Decaf","price":450}"#),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_storage_failure_hides_driver_message() {
    let (db, router) = app().await;
    db.close().await;

    let (status, body) = send(&router, request(Method::GET, "/", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = json(&body);
    assert!(!error.message.to_lowercase().contains("pool"));
}
