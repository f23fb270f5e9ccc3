//! Error types and HTTP error response handling.
//!
//! Every failure on the scan-and-serialize path becomes an [`AppError`], and
//! every [`AppError`] becomes the same 500 response. Callers never see a
//! fault escape the handler.

use crate::models::api::{ApiResponse, CorsHeaders};
use serde_json::json;

/// Fixed message returned in the `error` field of every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while fetching data from the database";

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Store Errors**: the scan itself failed (unreachable endpoint,
///   missing permissions, throttling, unknown table)
/// - **Serialization Errors**: an item could not be rendered as JSON
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The DynamoDB scan failed.
    ///
    /// Holds the full error chain as rendered by the SDK, so the
    /// `details` field carries the underlying cause and not just "service error".
    #[error("{0}")]
    Store(String),

    /// A numeric attribute did not hold a valid decimal.
    #[error("Invalid numeric value {0:?}")]
    InvalidNumber(String),

    /// An attribute type that has no JSON representation (binary data).
    #[error("Object of type {kind} is not JSON serializable (attribute {attribute:?})")]
    UnsupportedAttribute {
        attribute: String,
        kind: &'static str,
    },

    /// Encoding the response body failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl<E, R> From<aws_sdk_dynamodb::error::SdkError<E, R>> for AppError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(err: aws_sdk_dynamodb::error::SdkError<E, R>) -> Self {
        AppError::Store(aws_sdk_dynamodb::error::DisplayErrorContext(&err).to_string())
    }
}

impl AppError {
    /// Convert the error into the 500 response.
    ///
    /// # Response Format
    ///
    /// ```json
    /// {
    ///   "error": "Internal error while fetching data from the database",
    ///   "details": "<error string>"
    /// }
    /// ```
    ///
    /// The body is built with `json!` and cannot fail to encode.
    pub fn into_response(self, cors: &CorsHeaders) -> ApiResponse {
        let body = json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "details": self.to_string(),
        });

        ApiResponse::new(500, cors, body.to_string())
    }
}
