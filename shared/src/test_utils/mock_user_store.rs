use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use crate::error::{Result, StoreError};
use crate::models::{FilterCondition, User};
use crate::store::UserStore;

/// Store operations that can be observed or made to fail in `MockUserStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Get,
    Insert,
    Delete,
    Filter,
    GetAll,
}

/// MockUserStore is a simple in-memory implementation of UserStore for testing
///
/// Users are kept ordered by ID so listings are deterministic. Every call is
/// recorded, and any operation can be switched to fail with an internal error.
#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<BTreeMap<String, User>>,
    failing: Mutex<HashSet<StoreOperation>>,
    calls: Mutex<Vec<StoreOperation>>,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockUserStore with initial test data
    pub fn with_data(users: Vec<User>) -> Self {
        let store = Self::new();
        {
            let mut stored = store.users.lock().unwrap();
            for user in users {
                stored.insert(user.id.clone(), user);
            }
        }
        store
    }

    /// Make the given operation fail from now on
    pub fn fail_on(self, operation: StoreOperation) -> Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    /// Operations called so far, in call order
    pub fn calls(&self) -> Vec<StoreOperation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, operation: StoreOperation) -> bool {
        self.calls.lock().unwrap().contains(&operation)
    }

    /// Snapshot of a stored user, bypassing call recording and failures
    pub fn stored(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, operation: StoreOperation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(StoreError::InternalError(format!(
                "injected failure for {:?}",
                operation
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_user(&self, id: &str) -> Result<User> {
        self.record(StoreOperation::Get)?;
        self.users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User with id {} not found", id)))
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        self.record(StoreOperation::Insert)?;
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.record(StoreOperation::Delete)?;
        self.users.lock().unwrap().remove(id);
        Ok(())
    }

    async fn filter_users(&self, conditions: &[FilterCondition]) -> Result<Vec<User>> {
        self.record(StoreOperation::Filter)?;
        let users = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|user| user.matches(conditions))
            .cloned()
            .collect();
        Ok(users)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        self.record(StoreOperation::GetAll)?;
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}
