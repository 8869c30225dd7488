mod dynamo_tests;
mod routes_tests;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::handlers::AppState;
use crate::routes::create_router_with_state;
use users_shared::models::User;
use users_shared::publisher::EventPublisher;
use users_shared::store::UserStore;

// Router over the given store and publisher, with default config
pub fn create_test_app<S, P>(store: Arc<S>, publisher: Arc<P>) -> Router
where
    S: UserStore,
    P: EventPublisher,
{
    create_test_app_with_config(store, publisher, &ServiceConfig::default())
}

pub fn create_test_app_with_config<S, P>(
    store: Arc<S>,
    publisher: Arc<P>,
    config: &ServiceConfig,
) -> Router
where
    S: UserStore,
    P: EventPublisher,
{
    create_router_with_state(AppState::new(store, publisher), config)
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    raw_request(method, uri, body.to_string())
}

// Request with an arbitrary, possibly malformed, body
pub fn raw_request(method: Method, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn test_user(id: &str, nickname: &str, country: &str) -> User {
    User {
        id: id.to_string(),
        forename: format!("{}-forename", nickname),
        surname: format!("{}-surname", nickname),
        nickname: nickname.to_string(),
        password: "hunter2".to_string(),
        email: format!("{}@example.com", nickname),
        country: country.to_string(),
    }
}

pub fn create_test_users() -> Vec<User> {
    vec![
        test_user("user_1", "dupreeh", "DEN"),
        test_user("user_2", "shox", "FRA"),
        test_user("user_3", "device", "DEN"),
    ]
}
