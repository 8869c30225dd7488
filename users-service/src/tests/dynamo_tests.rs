// Runs the request flow against DynamoDB Local. Skipped unless USE_DYNAMODB=true.
use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use users_shared::models::events::UserAction;
use users_shared::store::dynamo::DynamoUserStore;
use users_shared::store::UserStore;
use users_shared::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_users_table, use_dynamodb,
};
use users_shared::test_utils::http_test_utils::response_to_json;
use users_shared::test_utils::mock_publisher::MockPublisher;
use users_shared::test_utils::test_logging::init_test_logging;

use super::{create_test_app, create_test_users, empty_request, json_request};

// Tests run in parallel, so each one owns its table
const LIFECYCLE_TABLE: &str = "users-lifecycle-test-table";
const FILTER_TABLE: &str = "users-filter-test-table";

async fn create_dynamo_store(table_name: &str) -> Arc<DynamoUserStore> {
    let client = create_dynamo_client().await;
    if let Err(e) = create_users_table(&client, table_name).await {
        eprintln!("Error setting up test table: {}", e);
    }
    clear_dynamo_table(&client, table_name).await;

    let store = Arc::new(DynamoUserStore::with_client_and_table(
        client,
        table_name.to_string(),
    ));
    for user in create_test_users() {
        store.insert_user(&user).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_dynamo_user_lifecycle() {
    if !use_dynamodb() {
        println!("Skipping DynamoDB test, USE_DYNAMODB is not set");
        return;
    }
    init_test_logging();
    let store = create_dynamo_store(LIFECYCLE_TABLE).await;
    let publisher = Arc::new(MockPublisher::new());
    let app = create_test_app(store.clone(), publisher.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users",
            &json!({"forename": "Mathieu", "surname": "Herbaut", "nickname": "ZywOo", "country": "FRA"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_to_json(response).await;
    let id = created["userId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, &format!("/users/{}", id)))
        .await
        .unwrap();
    assert_eq!(response_to_json(response).await, created);

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/users?country=FRA"))
        .await
        .unwrap();
    let body = response_to_json(response).await;
    assert_eq!(body["count"], 2);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/users/{}", id),
            &json!({"nickname": "ZywOo", "country": "FRA", "email": "zywoo@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.get_user(&id).await.unwrap().forename, "");

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, &format!("/users/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, &format!("/users/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request(Method::GET, "/users"))
        .await
        .unwrap();
    assert_eq!(response_to_json(response).await["count"], 3);

    let actions: Vec<UserAction> = publisher.events().iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![UserAction::Created, UserAction::Updated, UserAction::Deleted]
    );
}

#[tokio::test]
async fn test_dynamo_filter_without_matches() {
    if !use_dynamodb() {
        println!("Skipping DynamoDB test, USE_DYNAMODB is not set");
        return;
    }
    init_test_logging();
    let store = create_dynamo_store(FILTER_TABLE).await;
    let app = create_test_app(store, Arc::new(MockPublisher::new()));

    let response = app
        .oneshot(empty_request(Method::GET, "/users?country=DEN&nickname=shox"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_to_json(response).await, json!("no results found"));
}
