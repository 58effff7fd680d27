//! Handler tests for the Products domain
//!
//! Public catalog reads need no token; mutations go through the bearer
//! auth boundary and are scoped to the token's seller.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{BearerAuth, JwtAuth, JwtConfig};
use domain_products::*;
use domain_sellers::{NewSeller, PgSellerRepository, SellerRepository};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt;
use uuid::Uuid;

const TEST_SECRET: &str = "handler-test-secret-at-least-32-chars-long";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(TEST_SECRET))
}

fn test_app(db: &TestDatabase) -> Router {
    let auth = BearerAuth::new(jwt(), Arc::new(PgSellerRepository::new(db.connection())));
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);
    handlers::router(service, auth)
}

async fn seed_seller(db: &TestDatabase, username: String) -> (Uuid, String) {
    let repo = PgSellerRepository::new(db.connection());
    let seller = repo
        .create(NewSeller {
            name: "Handler Owner".to_string(),
            username: username.clone(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$fake$fake".to_string(),
        })
        .await
        .unwrap();

    let token = jwt().create_token(seller.id, &username).unwrap();
    (seller.id, token)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_product(app: &Router, token: &str, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "name": name,
                        "price": "2.49",
                        "quantity": 10,
                        "category": "produce",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_requires_token() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "X", "price": "1.00", "quantity": 1, "category": "misc" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_removed_seller_cannot_create_products() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("products_handler_removed_seller");
    let (seller_id, token) = seed_seller(&db, builder.username("owner")).await;

    PgSellerRepository::new(db.connection())
        .soft_delete(seller_id)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "X", "price": "1.00", "quantity": 1, "category": "misc" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_negative_price() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("products_handler_neg_price");
    let (_, token) = seed_seller(&db, builder.username("owner")).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "X", "price": "-1.00", "quantity": 1, "category": "misc" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_reads_are_public() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("products_handler_public");
    let (_, token) = seed_seller(&db, builder.username("owner")).await;

    let product = create_product(&app, &token, &builder.name("product", "apples")).await;

    // No authorization header on either read
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response.into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", product["id"].as_str().unwrap()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["id"], product["id"]);
    assert_eq!(fetched["price"], "2.49");
}

#[tokio::test]
async fn test_updating_another_sellers_product_returns_404() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("products_handler_cross");
    let (_, owner_token) = seed_seller(&db, builder.username("owner")).await;
    let (_, intruder_token) = seed_seller(&db, builder.username("intruder")).await;

    let product = create_product(&app, &owner_token, &builder.name("product", "apples")).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", product["id"].as_str().unwrap()))
                .header("authorization", format!("Bearer {}", intruder_token))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "price": "0.01" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Indistinguishable from a product that does not exist
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_own_product_returns_204_and_hides_it() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("products_handler_delete");
    let (_, token) = seed_seller(&db, builder.username("owner")).await;

    let product = create_product(&app, &token, &builder.name("product", "gone")).await;
    let uri = format!("/{}", product["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seller_products_view_is_public() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("products_handler_per_seller");
    let (seller_id, token) = seed_seller(&db, builder.username("owner")).await;

    let app = test_app(&db);
    create_product(&app, &token, &builder.name("product", "apples")).await;

    let seller_view = handlers::seller_products_router(ProductService::new(
        PgProductRepository::new(db.connection()),
    ));

    let response = seller_view
        .oneshot(
            Request::builder()
                .uri(format!("/{}/products", seller_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response.into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
