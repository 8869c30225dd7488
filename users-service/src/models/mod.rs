use serde::{Deserialize, Serialize};
use users_shared::models::{FilterResponse, User};

/// Body returned by a filtered search that matched nothing
pub const NO_RESULTS: &str = "no results found";

// Response DTOs
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum SearchResponse {
    Results(FilterResponse),
    /// Serialized as the bare JSON string `NO_RESULTS`
    NoResults(&'static str),
}

impl SearchResponse {
    /// Filtered searches report an empty match with the sentinel, not an empty list
    pub fn from_filtered(users: Vec<User>) -> Self {
        if users.is_empty() {
            SearchResponse::NoResults(NO_RESULTS)
        } else {
            SearchResponse::Results(FilterResponse::from(users))
        }
    }

    /// Full listings always carry the list and count, even when empty
    pub fn from_listing(users: Vec<User>) -> Self {
        SearchResponse::Results(FilterResponse::from(users))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    pub service: String,
    pub version: String,
}
