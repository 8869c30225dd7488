use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::types::MessageAttributeValue;
use aws_sdk_sns::Client;

use crate::error::PublishError;
use crate::models::events::UserEvent;

/// Message attribute carrying the action, so subscribers can filter on it
pub const ACTION_ATTRIBUTE: &str = "userAction";

/// Publishes user events to an SNS topic
pub struct SnsPublisher {
    client: Client,
    topic_arn: String,
}

impl SnsPublisher {
    /// Creates a publisher from a loaded AWS configuration
    pub fn from_sdk_config(config: &SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::with_client_and_topic(Client::new(config), topic_arn)
    }

    pub fn with_client_and_topic(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

/// JSON message body and the `userAction` attribute for an event
pub fn message_parts(event: &UserEvent) -> Result<(String, MessageAttributeValue), PublishError> {
    let message = serde_json::to_string(event)?;

    let action_attribute = MessageAttributeValue::builder()
        .data_type("String")
        .string_value(event.action.as_str())
        .build()
        .map_err(|e| PublishError::InvalidAttribute(e.to_string()))?;

    Ok((message, action_attribute))
}

#[async_trait]
impl super::EventPublisher for SnsPublisher {
    async fn publish(&self, event: &UserEvent) -> Result<(), PublishError> {
        let (message, action_attribute) = message_parts(event)?;

        let response = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message)
            .message_attributes(ACTION_ATTRIBUTE, action_attribute)
            .send()
            .await
            .map_err(|e| PublishError::Delivery(e.to_string()))?;

        tracing::debug!(
            user_id = %event.user_id,
            action = %event.action,
            message_id = ?response.message_id(),
            "Published user event"
        );

        Ok(())
    }
}
