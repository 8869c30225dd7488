use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod events;

/// A user record as stored in DynamoDB and returned over HTTP.
///
/// Attributes are free text. Missing attributes decode as empty strings, so a
/// body only has to be structurally valid JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    #[serde(rename = "userId")]
    pub id: String,
    pub forename: String,
    pub surname: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub country: String,
}

impl User {
    /// JSON attribute names, as written on the wire and in DynamoDB items
    pub const ATTRIBUTES: [&str; 7] = [
        "userId", "forename", "surname", "nickname", "password", "email", "country",
    ];

    /// Returns the value of a filterable attribute
    pub fn attribute(&self, field: UserField) -> &str {
        match field {
            UserField::Forename => &self.forename,
            UserField::Surname => &self.surname,
            UserField::Nickname => &self.nickname,
            UserField::Password => &self.password,
            UserField::Email => &self.email,
            UserField::Country => &self.country,
        }
    }

    pub fn matches(&self, conditions: &[FilterCondition]) -> bool {
        conditions
            .iter()
            .all(|condition| self.attribute(condition.field) == condition.value)
    }
}

/// User attributes that may appear in a search query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Forename,
    Surname,
    Nickname,
    Password,
    Email,
    Country,
}

impl UserField {
    pub const ALL: [UserField; 6] = [
        UserField::Country,
        UserField::Nickname,
        UserField::Surname,
        UserField::Forename,
        UserField::Email,
        UserField::Password,
    ];

    /// Attribute name used both in query strings and in the DynamoDB item
    pub fn attribute_name(self) -> &'static str {
        match self {
            UserField::Forename => "forename",
            UserField::Surname => "surname",
            UserField::Nickname => "nickname",
            UserField::Password => "password",
            UserField::Email => "email",
            UserField::Country => "country",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUserField(pub String);

impl fmt::Display for UnknownUserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown user field: {}", self.0)
    }
}

impl std::error::Error for UnknownUserField {}

impl FromStr for UserField {
    type Err = UnknownUserField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserField::ALL
            .into_iter()
            .find(|field| field.attribute_name() == s)
            .ok_or_else(|| UnknownUserField(s.to_string()))
    }
}

/// A single equality predicate; a search ANDs all of its conditions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: UserField,
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: UserField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Response body for a search that produced results, or for a full listing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterResponse {
    pub results: Vec<User>,
    pub count: usize,
}

impl From<Vec<User>> for FilterResponse {
    fn from(results: Vec<User>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}
