use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of mutation a `UserEvent` announces
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    #[serde(rename = "AddNewUser")]
    Created,
    #[serde(rename = "DeleteUser")]
    Deleted,
    #[serde(rename = "UpdateUser")]
    Updated,
}

impl UserAction {
    /// Wire name, also used as the SNS `userAction` message attribute
    pub fn as_str(self) -> &'static str {
        match self {
            UserAction::Created => "AddNewUser",
            UserAction::Deleted => "DeleteUser",
            UserAction::Updated => "UpdateUser",
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event published after a user has been created, updated or deleted
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserEvent {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userAction")]
    pub action: UserAction,
    #[serde(rename = "creationTime")]
    pub created_at: DateTime<Utc>,
}

impl UserEvent {
    pub fn new(user_id: impl Into<String>, action: UserAction) -> Self {
        Self {
            user_id: user_id.into(),
            action,
            created_at: Utc::now(),
        }
    }
}
