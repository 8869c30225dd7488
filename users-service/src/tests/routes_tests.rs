use axum::http::{Method, Request, StatusCode};
use axum::body::Body;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use users_shared::test_utils::http_test_utils::{response_to_bytes, response_to_json};
use users_shared::test_utils::mock_publisher::MockPublisher;
use users_shared::test_utils::mock_user_store::MockUserStore;
use users_shared::test_utils::test_logging::init_test_logging;

use super::{create_test_app, create_test_app_with_config, create_test_users, empty_request};
use crate::config::ServiceConfig;

fn repo_docs() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../docs/index.html"))
}

fn seeded_app(config: &ServiceConfig) -> axum::Router {
    create_test_app_with_config(
        Arc::new(MockUserStore::with_data(create_test_users())),
        Arc::new(MockPublisher::new()),
        config,
    )
}

#[tokio::test]
async fn test_healthcheck() {
    init_test_logging();
    let config = ServiceConfig {
        service_name: "users-test".to_string(),
        service_version: "9.9.9".to_string(),
        ..ServiceConfig::default()
    };
    let app = seeded_app(&config);

    let response = app
        .oneshot(empty_request(Method::GET, "/healthcheck"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_to_json(response).await,
        json!({"service": "users-test", "version": "9.9.9"})
    );
}

#[tokio::test]
async fn test_docs_are_served() {
    init_test_logging();
    let config = ServiceConfig {
        docs_path: repo_docs(),
        ..ServiceConfig::default()
    };
    let app = seeded_app(&config);

    let response = app
        .oneshot(empty_request(Method::GET, "/docs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html");

    let body = String::from_utf8(response_to_bytes(response).await).unwrap();
    assert!(body.contains("/users"));
}

#[tokio::test]
async fn test_missing_docs_file() {
    init_test_logging();
    let config = ServiceConfig {
        docs_path: PathBuf::from("/nonexistent/users-docs.html"),
        ..ServiceConfig::default()
    };
    let app = seeded_app(&config);

    let response = app
        .oneshot(empty_request(Method::GET, "/docs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_not_found() {
    init_test_logging();
    let app = create_test_app(Arc::new(MockUserStore::new()), Arc::new(MockPublisher::new()));

    let response = app
        .oneshot(empty_request(Method::GET, "/groups"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = String::from_utf8(response_to_bytes(response).await).unwrap();
    assert_eq!(body, "The requested resource was not found");
}

#[tokio::test]
async fn test_unsupported_method() {
    init_test_logging();
    let app = create_test_app(Arc::new(MockUserStore::new()), Arc::new(MockPublisher::new()));

    let response = app
        .oneshot(empty_request(Method::PATCH, "/users/user_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_routes_nested_under_base_path() {
    init_test_logging();
    let config = ServiceConfig {
        base_path: "/Prod".to_string(),
        ..ServiceConfig::default()
    };
    let app = seeded_app(&config);

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/Prod/users/user_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_to_json(response).await["nickname"], "dupreeh");

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/Prod/healthcheck"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request(Method::GET, "/users/user_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_headers() {
    init_test_logging();
    let app = create_test_app(Arc::new(MockUserStore::new()), Arc::new(MockPublisher::new()));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/users")
        .header("origin", "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
