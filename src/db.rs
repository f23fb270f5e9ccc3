//! DynamoDB client construction and the table scan.
//!
//! This module provides:
//! - `ItemStore`: the one read the handler needs, so tests can swap the table out
//! - `DynamoTable`: the production store, a client bound to one table name
//! - `create_client`: builds the SDK client from the ambient AWS configuration

use crate::{
    config::Config,
    error::AppError,
    models::record::Item,
};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use std::future::Future;

/// Source of portfolio records.
pub trait ItemStore: Send + Sync {
    /// Read every item of the table in a single request.
    fn scan_all(&self) -> impl Future<Output = Result<Vec<Item>, AppError>> + Send;
}

/// Create a DynamoDB client.
///
/// Credentials and region come from the standard AWS provider chain
/// (environment, profile, or the Lambda execution role).
///
/// # Configuration
///
/// - `DYNAMODB_ENDPOINT_URL` overrides the endpoint, e.g. `http://localhost:8000`
///   for DynamoDB Local
pub async fn create_client(config: &Config) -> Client {
    // Region and credentials from the provider chain
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
    // Point at DynamoDB Local when configured
    if let Some(endpoint) = &config.dynamodb_endpoint_url {
        builder = builder.endpoint_url(endpoint);
    }

    Client::from_conf(builder.build())
}

/// A DynamoDB table handle.
///
/// Built once at startup and shared by every invocation; holds no mutable state.
#[derive(Debug, Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl ItemStore for DynamoTable {
    /// Unconditional `Scan` of the whole table.
    ///
    /// Only the first page is read. DynamoDB caps a page at 1 MB; when more
    /// data exists a warning is logged and the remainder is not fetched.
    async fn scan_all(&self) -> Result<Vec<Item>, AppError> {
        tracing::debug!(table = %self.table_name, "Scanning table");

        // Single request, no pagination
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await?;

        // A LastEvaluatedKey means the 1 MB page limit cut the result short
        if output.last_evaluated_key().is_some() {
            tracing::warn!(
                table = %self.table_name,
                "Scan result truncated at the 1 MB page limit; remaining items were not read"
            );
        }

        Ok(output.items.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::{
        config::{Credentials, Region, retry::RetryConfig},
        operation::scan::{ScanError, ScanOutput},
        types::{AttributeValue, error::ResourceNotFoundException},
    };
    use aws_smithy_mocks::{mock, mock_client};
    use std::collections::HashMap;

    fn project_item(id: &str) -> Item {
        HashMap::from([
            ("id".to_string(), AttributeValue::S(id.into())),
            ("rank".to_string(), AttributeValue::N("5".into())),
        ])
    }

    #[tokio::test]
    async fn scan_reads_the_configured_table() {
        let scan = mock!(Client::scan)
            .match_requests(|req| req.table_name() == Some("portfolio-metadata"))
            .then_output(|| {
                ScanOutput::builder()
                    .set_items(Some(vec![project_item("1"), project_item("2")]))
                    .build()
            });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&scan]), "portfolio-metadata");

        let items = table.scan_all().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], AttributeValue::S("1".into()));
        assert_eq!(scan.num_calls(), 1);
    }

    #[tokio::test]
    async fn truncated_scan_returns_only_the_first_page() {
        let scan = mock!(Client::scan).then_output(|| {
            ScanOutput::builder()
                .set_items(Some(vec![project_item("1")]))
                .set_last_evaluated_key(Some(HashMap::from([(
                    "id".to_string(),
                    AttributeValue::S("1".into()),
                )])))
                .build()
        });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&scan]), "portfolio-metadata");

        let items = table.scan_all().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(scan.num_calls(), 1, "remaining pages must not be requested");
    }

    #[tokio::test]
    async fn missing_items_field_is_an_empty_table() {
        let scan = mock!(Client::scan).then_output(|| ScanOutput::builder().build());
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&scan]), "portfolio-metadata");

        assert!(table.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn service_error_details_name_the_cause() {
        let scan = mock!(Client::scan).then_error(|| {
            ScanError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&scan]), "missing-table");

        let err = table.scan_all().await.unwrap_err();

        let details = match err {
            AppError::Store(details) => details,
            other => panic!("expected a store error, got {other:?}"),
        };
        assert!(details.contains("Requested resource not found"), "{details}");
        assert_ne!(details, "service error");
    }

    #[tokio::test]
    async fn unreachable_endpoint_details_include_the_io_cause() {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();
        let table = DynamoTable::new(Client::from_conf(config), "portfolio-metadata");

        let err = table.scan_all().await.unwrap_err();

        let details = match err {
            AppError::Store(details) => details,
            other => panic!("expected a store error, got {other:?}"),
        };
        assert!(details.starts_with("dispatch failure"), "{details}");
        assert!(details.len() > "dispatch failure".len(), "{details}");
    }
}
