use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

/// Helper function to extract JSON from an Axum response
pub async fn response_to_json(response: Response) -> Value {
    let bytes = response_to_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Raw body of an Axum response, for asserting on empty or non-JSON bodies
pub async fn response_to_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
