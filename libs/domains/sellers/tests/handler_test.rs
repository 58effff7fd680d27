//! Handler tests for the Sellers domain
//!
//! Exercise the HTTP surface end to end against real PostgreSQL:
//! status codes, JSON bodies, and the bearer auth boundary.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{BearerAuth, JwtAuth, JwtConfig};
use domain_sellers::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt;

const TEST_SECRET: &str = "handler-test-secret-at-least-32-chars-long";

fn test_app(db: &TestDatabase) -> Router {
    let jwt_auth = JwtAuth::new(&JwtConfig::new(TEST_SECRET));
    let auth = BearerAuth::new(
        jwt_auth.clone(),
        Arc::new(PgSellerRepository::new(db.connection())),
    );
    let repo = PgSellerRepository::new(db.connection());
    let service = SellerService::new(repo, jwt_auth);
    handlers::router(service, auth)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn register(app: &Router, username: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({
                "name": "Handler Seller",
                "username": username,
                "password": "correct-horse-battery",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn login(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "username": username, "password": "correct-horse-battery" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_returns_201_without_password() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_register");

    let seller = register(&app, &builder.username("new")).await;

    assert_eq!(seller["username"], builder.username("new"));
    assert!(seller.get("password").is_none());
    assert!(seller.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_returns_409() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_dup");

    register(&app, &builder.username("dup")).await;

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Another",
                "username": builder.username("dup"),
                "password": "correct-horse-battery",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);

    let response = app
        .oneshot(post_json(
            "/",
            json!({ "name": "X", "username": "short_pw_user", "password": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password_returns_401() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_badlogin");

    register(&app, &builder.username("login")).await;

    let response = app
        .oneshot(post_json(
            "/login",
            json!({ "username": builder.username("login"), "password": "wrong-password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_mutations_require_bearer_token() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_no_token");

    let seller = register(&app, &builder.username("locked")).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", seller["id"].as_str().unwrap()))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": "Nope" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seller_reads_are_public() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_public");

    let seller = register(&app, &builder.username("visible")).await;

    // No authorization header on either read
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", seller["id"].as_str().unwrap()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], seller["id"]);
    assert!(body.get("password_hash").is_none());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response.into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_updating_another_seller_returns_403() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_forbidden");

    let victim = register(&app, &builder.username("victim")).await;
    register(&app, &builder.username("attacker")).await;
    let token = login(&app, &builder.username("attacker")).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", victim["id"].as_str().unwrap()))
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": "Hijacked" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleting_own_account_returns_204() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_delete");

    let seller = register(&app, &builder.username("self")).await;
    let token = login(&app, &builder.username("self")).await;
    let uri = format!("/{}", seller["id"].as_str().unwrap());

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

    // The account is gone from public reads afterwards
    let response = app
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_sellers_token_is_rejected() {
    let db = TestDatabase::new().await;
    let app = test_app(&db);
    let builder = TestDataBuilder::from_test_name("sellers_handler_stale_token");

    let seller = register(&app, &builder.username("stale")).await;
    let token = login(&app, &builder.username("stale")).await;
    let uri = format!("/{}", seller["id"].as_str().unwrap());

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

    // The token is still within its TTL but the account no longer exists,
    // so the auth boundary must turn it away.
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(&uri)
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": "Ghost" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
