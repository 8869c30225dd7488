use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use crate::error::{map_dynamo_error, map_get_dynamo_error, Result, StoreError};
use crate::models::{FilterCondition, User};

/// Partition key attribute of the users table
pub const USER_PARTITION_KEY: &str = "userId";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB store for users
pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Creates a store from a loaded AWS configuration
    pub fn from_sdk_config(config: &SdkConfig, table_name: impl Into<String>) -> Self {
        Self::with_client_and_table(Client::new(config), table_name)
    }

    /// Creates a new DynamoDB store with the specified client and table name.
    /// This is mainly useful for testing with a local DynamoDB instance.
    pub fn with_client_and_table(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(id: &str) -> Item {
        HashMap::from([(
            USER_PARTITION_KEY.to_string(),
            AttributeValue::S(id.to_string()),
        )])
    }

    /// Scans the whole table, following `LastEvaluatedKey` until it is exhausted
    async fn scan_users(&self, filter: Option<FilterExpression>) -> Result<Vec<User>> {
        let (expression, names, values) = match filter {
            Some(filter) => (
                Some(filter.expression),
                Some(filter.names),
                Some(filter.values),
            ),
            None => (None, None, None),
        };

        let mut users = Vec::new();
        let mut last_key: Option<Item> = None;
        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_filter_expression(expression.clone())
                .set_expression_attribute_names(names.clone())
                .set_expression_attribute_values(values.clone())
                .set_exclusive_start_key(last_key.take())
                .send()
                .await
                .map_err(|e| map_dynamo_error("scan", e))?;

            for item in response.items() {
                let user: User = from_item(item.clone())?;
                users.push(user);
            }

            last_key = response.last_evaluated_key;
            if last_key.is_none() {
                break;
            }
            tracing::debug!(
                table = %self.table_name,
                scanned = users.len(),
                "Scan page exhausted, continuing from last evaluated key"
            );
        }

        Ok(users)
    }
}

#[async_trait]
impl super::UserStore for DynamoUserStore {
    async fn get_user(&self, id: &str) -> Result<User> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .send()
            .await
            .map_err(|e| map_get_dynamo_error(e, id))?;

        let item = response
            .item
            .ok_or_else(|| StoreError::NotFound(format!("User not found: {}", id)))?;

        let user = from_item(item)?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let item: Item = to_item(user)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_dynamo_error("put_item", e))?;

        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .send()
            .await
            .map_err(|e| map_dynamo_error("delete_item", e))?;

        Ok(())
    }

    async fn filter_users(&self, conditions: &[FilterCondition]) -> Result<Vec<User>> {
        self.scan_users(FilterExpression::from_conditions(conditions))
            .await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        self.scan_users(None).await
    }
}

/// A scan `FilterExpression` together with its placeholder maps
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: Item,
}

impl FilterExpression {
    /// ANDs one equality clause per condition, `None` when there is nothing to filter on.
    ///
    /// Attribute names always go through `#fN` placeholders so they can never
    /// collide with DynamoDB reserved words.
    pub fn from_conditions(conditions: &[FilterCondition]) -> Option<Self> {
        if conditions.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(conditions.len());
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        for (index, condition) in conditions.iter().enumerate() {
            let name_placeholder = format!("#f{}", index);
            let value_placeholder = format!(":v{}", index);
            clauses.push(format!("{} = {}", name_placeholder, value_placeholder));
            names.insert(
                name_placeholder,
                condition.field.attribute_name().to_string(),
            );
            values.insert(
                value_placeholder,
                AttributeValue::S(condition.value.clone()),
            );
        }

        Some(Self {
            expression: clauses.join(" AND "),
            names,
            values,
        })
    }
}
