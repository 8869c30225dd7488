//! # DynamoDB test utilities
//!
//! These utilities set up and clean a users table on DynamoDB Local. Tests
//! only use them when `USE_DYNAMODB=true`; otherwise they run against
//! `MockUserStore`.
//!
//! ## Example
//! ```ignore
//! use users_shared::test_utils::test_logging::init_test_logging;
//! use users_shared::test_utils::dynamo_test_utils;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! init_test_logging();
//! let client = dynamo_test_utils::create_dynamo_client().await;
//! dynamo_test_utils::create_users_table(&client, "users-test-table").await?;
//! # Ok(())
//! # }
//! ```

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use std::error::Error;
// Use log macros, but ensure test_logging::init_test_logging() is called in test files
use log::{debug, error, info};

use crate::store::dynamo::USER_PARTITION_KEY;

// Constants for DynamoDB tests
pub const DYNAMO_LOCAL_URI: &str = "http://localhost:8000";

// Helper to check if DynamoDB integration tests should be used
pub fn use_dynamodb() -> bool {
    std::env::var("USE_DYNAMODB").unwrap_or_default() == "true"
}

// Helper to set up a DynamoDB client for local testing
pub async fn create_dynamo_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(DYNAMO_LOCAL_URI)
        .load()
        .await;

    Client::new(&config)
}

// Helper to create the users table, dropping any previous table with the same name
pub async fn create_users_table(client: &Client, table_name: &str) -> Result<(), Box<dyn Error>> {
    info!("Creating users table '{}' for testing...", table_name);

    let tables = client.list_tables().send().await?;
    if tables.table_names().contains(&table_name.to_string()) {
        info!("Table '{}' already exists, deleting it first...", table_name);
        client.delete_table().table_name(table_name).send().await?;

        loop {
            let tables = client.list_tables().send().await?;
            if !tables.table_names().contains(&table_name.to_string()) {
                info!("Table '{}' successfully deleted!", table_name);
                break;
            }
            debug!("Table '{}' still exists, waiting...", table_name);
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
    }

    let id_key = KeySchemaElement::builder()
        .attribute_name(USER_PARTITION_KEY)
        .key_type(KeyType::Hash)
        .build()?;

    let id_attr = AttributeDefinition::builder()
        .attribute_name(USER_PARTITION_KEY)
        .attribute_type(ScalarAttributeType::S)
        .build()?;

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(id_key)
        .attribute_definitions(id_attr)
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()?,
        )
        .send()
        .await;
    match &create_result {
        Ok(_) => info!("Table '{}' creation request successful", table_name),
        Err(e) => error!("Error creating table '{}': {}", table_name, e),
    }
    create_result?;

    info!("Waiting for table '{}' to become ACTIVE...", table_name);
    loop {
        match client.describe_table().table_name(table_name).send().await {
            Ok(resp) => {
                let status = resp.table().and_then(|table| table.table_status());
                if status == Some(&TableStatus::Active) {
                    break;
                }
                debug!("Table '{}' status: {:?}", table_name, status);
            }
            Err(e) => error!("Error checking table status: {}", e),
        }
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }

    info!("Table '{}' is ready for testing!", table_name);
    Ok(())
}

// Helper to clean the DynamoDB table between tests
pub async fn clear_dynamo_table(client: &Client, table_name: &str) {
    let mut last_key = None;
    loop {
        let scan_resp = match client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(last_key.take())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                // Keep the test running, it will fail on its own assertions
                error!("Failed to scan table '{}': {}", table_name, e);
                break;
            }
        };

        for item in scan_resp.items() {
            let Some(AttributeValue::S(id)) = item.get(USER_PARTITION_KEY) else {
                continue;
            };
            if let Err(e) = client
                .delete_item()
                .table_name(table_name)
                .key(USER_PARTITION_KEY, AttributeValue::S(id.clone()))
                .send()
                .await
            {
                error!(
                    "Failed to delete item '{}' from table '{}': {}",
                    id, table_name, e
                );
            }
        }

        last_key = scan_resp.last_evaluated_key;
        if last_key.is_none() {
            break;
        }
    }
}
