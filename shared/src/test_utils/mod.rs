pub mod dynamo_test_utils;
pub mod http_test_utils;
pub mod mock_publisher;
pub mod mock_user_store;
pub mod test_logging;
