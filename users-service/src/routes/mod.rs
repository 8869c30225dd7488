use axum::{extract::Request, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

use crate::config::ServiceConfig;
use crate::handlers::{
    health::healthcheck,
    user_handlers::{create_user, delete_user, get_user, search_users, update_user},
    AppState,
};
use crate::models::HealthCheck;
use users_shared::publisher::{sns::SnsPublisher, EventPublisher};
use users_shared::store::{dynamo::DynamoUserStore, UserStore};

pub const USERS_PATH: &str = "/users";
pub const SINGLE_USER_PATH: &str = "/users/:id";
pub const HEALTHCHECK_PATH: &str = "/healthcheck";
pub const DOCS_PATH: &str = "/docs";

/// Creates a router backed by DynamoDB and SNS
pub async fn create_router(config: &ServiceConfig) -> Router {
    let aws_config = config.load_aws_config().await;
    let store = Arc::new(DynamoUserStore::from_sdk_config(
        &aws_config,
        config.users_table.clone(),
    ));
    let publisher = Arc::new(SnsPublisher::from_sdk_config(
        &aws_config,
        config.topic_arn.clone(),
    ));
    tracing::info!(
        "Creating router with DynamoDB table '{}' and SNS topic '{}'",
        store.table_name(),
        publisher.topic_arn()
    );

    create_router_with_state(AppState::new(store, publisher), config)
}

/// Creates a router with the given store and publisher implementations
pub fn create_router_with_state<S, P>(state: AppState<S, P>, config: &ServiceConfig) -> Router
where
    S: UserStore,
    P: EventPublisher,
{
    let prefix = config.base_path.as_str();
    tracing::info!("Setting up API routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        tracing::info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        let response = next.run(req).await;
        tracing::info!("Responding with status={}", response.status());
        response
    }

    let user_routes = Router::new()
        .route(USERS_PATH, get(search_users).post(create_user))
        .route(
            SINGLE_USER_PATH,
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state);

    let health = Arc::new(HealthCheck {
        service: config.service_name.clone(),
        version: config.service_version.clone(),
    });
    let service_routes = Router::new()
        .route(HEALTHCHECK_PATH, get(healthcheck))
        .with_state(health)
        .route_service(DOCS_PATH, ServeFile::new(&config.docs_path));

    let api_routes = user_routes.merge(service_routes);

    // axum refuses to nest under an empty path
    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    // Add a fallback handler for 404s
    router
        .fallback(|req: Request| async move {
            tracing::warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                axum::http::StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
