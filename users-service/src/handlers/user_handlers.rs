use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::de::Error as _;
use serde_json::{Map, Value};
use uuid::Uuid;

use users_shared::models::events::{UserAction, UserEvent};
use users_shared::models::User;
use users_shared::publisher::EventPublisher;
use users_shared::store::UserStore;

use super::filters::{group_query_params, parse_conditions};
use super::{AppState, UserId};
use crate::error::{AppError, Result};
use crate::models::SearchResponse;

// Body rejections are reported through `AppError` after any id lookup
type RawBody = std::result::Result<Bytes, BytesRejection>;

// GET /users/:id
pub async fn get_user<S, P>(
    State(state): State<AppState<S, P>>,
    UserId(id): UserId,
) -> Result<Json<User>>
where
    S: UserStore,
    P: EventPublisher,
{
    tracing::info!(user_id = %id, "Retrieving user");
    let user = find_user(&*state.store, &id).await?;

    tracing::info!(user_id = %id, "Retrieved user");
    Ok(Json(user))
}

// POST /users
pub async fn create_user<S, P>(
    State(state): State<AppState<S, P>>,
    body: RawBody,
) -> Result<(StatusCode, Json<User>)>
where
    S: UserStore,
    P: EventPublisher,
{
    // The server always owns identity, whatever the body says
    let user = decode_user(body, Uuid::new_v4().to_string())?;

    tracing::info!(user_id = %user.id, "Inserting user");
    state
        .store
        .insert_user(&user)
        .await
        .map_err(|err| AppError::storage("unable to store user", err))?;

    announce(&*state.publisher, &user.id, UserAction::Created).await;

    Ok((StatusCode::CREATED, Json(user)))
}

// DELETE /users/:id
pub async fn delete_user<S, P>(
    State(state): State<AppState<S, P>>,
    UserId(id): UserId,
) -> Result<StatusCode>
where
    S: UserStore,
    P: EventPublisher,
{
    tracing::info!(user_id = %id, "Checking user exists before delete");
    let user = find_user(&*state.store, &id).await?;

    tracing::info!(user_id = %id, "Deleting user");
    state
        .store
        .delete_user(&user.id)
        .await
        .map_err(|err| AppError::storage(format!("unable to remove user: {}", id), err))?;

    announce(&*state.publisher, &user.id, UserAction::Deleted).await;

    Ok(StatusCode::NO_CONTENT)
}

// PUT /users/:id
// Full replace: every field of the stored record is overwritten by the body
pub async fn update_user<S, P>(
    State(state): State<AppState<S, P>>,
    UserId(id): UserId,
    body: RawBody,
) -> Result<Json<User>>
where
    S: UserStore,
    P: EventPublisher,
{
    tracing::info!(user_id = %id, "Checking user exists before update");
    let existing = find_user(&*state.store, &id).await?;

    let user = decode_user(body, existing.id)?;

    tracing::info!(user_id = %user.id, "Inserting updated user");
    state
        .store
        .insert_user(&user)
        .await
        .map_err(|err| AppError::storage(format!("unable to update user: {}", id), err))?;

    announce(&*state.publisher, &user.id, UserAction::Updated).await;

    Ok(Json(user))
}

// GET /users?field=value&...
pub async fn search_users<S, P>(
    State(state): State<AppState<S, P>>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResponse>>
where
    S: UserStore,
    P: EventPublisher,
{
    let Query(pairs) =
        query.map_err(|rejection| AppError::BadRequest(format!("malformed query: {}", rejection)))?;

    if pairs.is_empty() {
        tracing::info!("No query params, returning all users");
        return list_users(&*state.store).await.map(Json);
    }

    let params = group_query_params(pairs);
    let conditions = parse_conditions(&params)?;

    tracing::info!(conditions = conditions.len(), "Filtering users");
    let users = state
        .store
        .filter_users(&conditions)
        .await
        .map_err(|err| AppError::storage("unable to search for users", err))?;

    if users.is_empty() {
        tracing::info!("No results found for filters");
    } else {
        tracing::info!(count = users.len(), "Filtered users");
    }
    Ok(Json(SearchResponse::from_filtered(users)))
}

async fn list_users<S: UserStore>(store: &S) -> Result<SearchResponse> {
    let users = store
        .get_all_users()
        .await
        .map_err(|err| AppError::storage("unable to retrieve users", err))?;

    tracing::info!(count = users.len(), "Retrieved all users");
    Ok(SearchResponse::from_listing(users))
}

// Any lookup failure is reported as a missing user; the real cause is only logged
async fn find_user<S: UserStore>(store: &S, id: &str) -> Result<User> {
    store.get_user(id).await.map_err(|err| {
        tracing::error!(user_id = %id, error = %err, "Unable to retrieve user");
        AppError::NotFound(format!("unable to find user: {}", id))
    })
}

fn decode_user(body: RawBody, id: String) -> Result<User> {
    let body = body.map_err(|rejection| {
        tracing::error!(error = %rejection, "Unable to read request body");
        AppError::BadRequest(format!("malformed request body: {}", rejection))
    })?;

    let mut user = parse_user(&body).map_err(|err| {
        tracing::error!(error = %err, "Unable to decode request body");
        AppError::BadRequest(format!("malformed request body: {}", err))
    })?;
    user.id = id;
    Ok(user)
}

// Only the first JSON value is read, anything after it is ignored. A `null`
// body or attribute leaves the defaults in place.
fn parse_user(body: &[u8]) -> serde_json::Result<User> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| serde_json::Error::custom("EOF while parsing a value"))??;

    match value {
        Value::Null => Ok(User::default()),
        Value::Object(fields) => serde_json::from_value(Value::Object(canonical_keys(fields))),
        other => serde_json::from_value(other),
    }
}

// Keys match attribute names case-insensitively; an exact match takes precedence
fn canonical_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let (exact, other): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .partition(|(key, _)| User::ATTRIBUTES.contains(&key.as_str()));

    let mut canonical: Map<String, Value> = exact.into_iter().collect();
    for (key, value) in other {
        if let Some(name) = User::ATTRIBUTES
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&key))
        {
            canonical.entry(name.to_string()).or_insert(value);
        }
    }
    canonical
}

// Publishing happens after the write has succeeded, so a failure here is logged and swallowed
async fn announce<P: EventPublisher>(publisher: &P, user_id: &str, action: UserAction) {
    let event = UserEvent::new(user_id, action);
    match publisher.publish(&event).await {
        Ok(()) => tracing::info!(user_id, action = %action, "Published user event"),
        Err(err) => tracing::error!(
            user_id,
            action = %action,
            error = %err,
            "Unable to publish user event, change is already stored"
        ),
    }
}
