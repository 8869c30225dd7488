use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a `UserStore` implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal store error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Errors raised while publishing a user event
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Event serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid message attribute: {0}")]
    InvalidAttribute(String),

    #[error("SNS publish error: {0}")]
    Delivery(String),
}

// Helper function to map general DynamoDB errors
pub fn map_dynamo_error<E>(operation: &str, err: SdkError<E>) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::InternalError(format!("DynamoDB {} error: {}", operation, err))
}

// GetItem only reports a missing table as not found, a missing item is handled by the caller
pub fn map_get_dynamo_error(err: SdkError<GetItemError>, id: &str) -> StoreError {
    match &err {
        SdkError::ServiceError(service_err)
            if service_err.err().is_resource_not_found_exception() =>
        {
            StoreError::NotFound(format!("User table not found while fetching {}", id))
        }
        _ => StoreError::InternalError(format!("DynamoDB get_item error: {}", err)),
    }
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::SerializationError(format!("DynamoDB serialization error: {}", err))
    }
}
