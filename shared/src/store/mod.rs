use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FilterCondition, User};

// Expose the DynamoDB store module
pub mod dynamo;

/// UserStore trait defining the interface for user storage implementations
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Gets a user by ID, `StoreError::NotFound` when there is no such user
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Writes a user, replacing any record with the same ID
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Deletes a user
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Gets every user matching all of the conditions; an empty vector means no match
    async fn filter_users(&self, conditions: &[FilterCondition]) -> Result<Vec<User>>;

    /// Gets every stored user
    async fn get_all_users(&self) -> Result<Vec<User>>;
}
