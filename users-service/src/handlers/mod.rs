pub mod filters;
pub mod health;
pub mod user_handlers;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::sync::Arc;

use users_shared::publisher::EventPublisher;
use users_shared::store::UserStore;

use crate::error::AppError;

/// Handles shared by every user request; nothing in here is mutated per request
pub struct AppState<S, P> {
    pub store: Arc<S>,
    pub publisher: Arc<P>,
}

impl<S, P> AppState<S, P>
where
    S: UserStore,
    P: EventPublisher,
{
    pub fn new(store: Arc<S>, publisher: Arc<P>) -> Self {
        Self { store, publisher }
    }
}

// Manual impl: deriving would require S and P themselves to be Clone
impl<S, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

/// The `:id` path segment of a single-user route.
///
/// A segment that does not decode to UTF-8 can never name a stored user, so it
/// is rejected as not found with the raw segment in the message.
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(UserId(id)),
            Err(rejection) => {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                tracing::warn!(segment = raw, error = %rejection, "Unusable user id in path");
                Err(AppError::NotFound(format!("unable to find user: {}", raw)))
            }
        }
    }
}
