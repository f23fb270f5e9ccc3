//! Portfolio project listing handler.
//!
//! # Behavior
//!
//! - `OPTIONS`: empty 200 with CORS headers, the table is not touched
//! - anything else: scan the table and return every record as a JSON array
//! - any failure: 500 with `{"error": ..., "details": ...}`
//!
//! Every response carries the same CORS headers.

use crate::{
    db::ItemStore,
    error::AppError,
    models::{
        api::{ApiResponse, CorsHeaders, ProxyRequest},
        record::items_to_json,
    },
};

/// Handle one API Gateway proxy event.
///
/// This never fails: errors from the scan or from rendering the items are
/// logged and turned into the 500 response.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "id": "1", "title": "A", "rank": 5 }
/// ]
/// ```
///
/// # Response (500 Internal Server Error)
///
/// ```json
/// {
///   "error": "Internal error while fetching data from the database",
///   "details": "ResourceNotFoundException: Requested resource not found"
/// }
/// ```
///
/// # Arguments
///
/// * `store` - table handle shared across invocations
/// * `cors` - headers attached to the response
/// * `event` - the inbound event; only `httpMethod` is inspected
pub async fn list_projects<S: ItemStore>(
    store: &S,
    cors: &CorsHeaders,
    event: &ProxyRequest,
) -> ApiResponse {
    let received = serde_json::to_string(event).unwrap_or_default();
    tracing::info!(event = %received, "Received event");

    // Pre-flight never touches the table
    if event.is_preflight() {
        return ApiResponse::preflight(cors);
    }

    match scan_projects(store).await {
        Ok((count, body)) => {
            tracing::info!(count, "Projects listed");
            ApiResponse::new(200, cors, body)
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to read projects from the table");
            err.into_response(cors)
        }
    }
}

/// Scan and render the table; returns the item count and the JSON body.
async fn scan_projects<S: ItemStore>(store: &S) -> Result<(usize, String), AppError> {
    let items = store.scan_all().await?;
    let count = items.len();
    let body = serde_json::to_string(&items_to_json(items)?)?;
    Ok((count, body))
}
