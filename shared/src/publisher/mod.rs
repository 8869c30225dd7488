use async_trait::async_trait;

use crate::error::PublishError;
use crate::models::events::UserEvent;

// Expose the SNS publisher module
pub mod sns;

/// EventPublisher trait defining the interface for announcing user mutations
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publishes a single event, without retrying
    async fn publish(&self, event: &UserEvent) -> Result<(), PublishError>;
}
