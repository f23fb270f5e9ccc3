//! API Gateway proxy event and response types.
//!
//! This module defines:
//! - `ProxyRequest`: the inbound event (only `httpMethod` is read)
//! - `CorsHeaders`: the header set attached to every response
//! - `ApiResponse`: the proxy response returned to API Gateway

use crate::config::Config;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound API Gateway proxy event.
///
/// # JSON Example
///
/// ```json
/// {
///   "httpMethod": "GET",
///   "path": "/projects",
///   "headers": { "origin": "https://example.com" }
/// }
/// ```
///
/// Everything besides `httpMethod` is kept in `metadata` so the event can be
/// logged as received, but the handler never looks at it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProxyRequest {
    /// Kept as raw JSON: a malformed method must still reach the handler.
    #[serde(rename = "httpMethod", default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<Value>,

    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl ProxyRequest {
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            http_method: Some(Value::String(method.into())),
            metadata: Map::new(),
        }
    }

    /// Whether this is a CORS pre-flight request.
    ///
    /// Case-sensitive: API Gateway always sends upper-case methods.
    pub fn is_preflight(&self) -> bool {
        self.method() == Some("OPTIONS")
    }

    /// The method, if the event carries one as a string.
    pub fn method(&self) -> Option<&str> {
        self.http_method.as_ref().and_then(Value::as_str)
    }
}

/// CORS headers attached to every response.
///
/// Field order is the serialized order; the shape never changes between
/// success, error and pre-flight responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,

    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,

    #[serde(rename = "Access-Control-Allow-Methods")]
    pub allow_methods: String,

    #[serde(rename = "Access-Control-Allow-Headers")]
    pub allow_headers: String,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json".to_string(),
            allow_origin: "*".to_string(),
            allow_methods: "GET, OPTIONS".to_string(),
            allow_headers: "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token"
                .to_string(),
        }
    }
}

impl From<&Config> for CorsHeaders {
    fn from(config: &Config) -> Self {
        Self {
            content_type: "application/json".to_string(),
            allow_origin: config.cors_allow_origin.clone(),
            allow_methods: config.cors_allow_methods.clone(),
            allow_headers: config.cors_allow_headers.clone(),
        }
    }
}

impl CorsHeaders {
    /// Header name/value pairs, in serialized order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("Content-Type", self.content_type.as_str()),
            ("Access-Control-Allow-Origin", self.allow_origin.as_str()),
            ("Access-Control-Allow-Methods", self.allow_methods.as_str()),
            ("Access-Control-Allow-Headers", self.allow_headers.as_str()),
        ]
    }
}

/// API Gateway proxy response.
///
/// # JSON Example
///
/// ```json
/// {
///   "statusCode": 200,
///   "headers": { "Content-Type": "application/json", "...": "..." },
///   "body": "[{\"id\":\"1\"}]"
/// }
/// ```
///
/// `body` is a JSON document encoded as a string, as API Gateway expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    pub headers: CorsHeaders,

    pub body: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, cors: &CorsHeaders, body: String) -> Self {
        Self {
            status_code,
            headers: cors.clone(),
            body,
        }
    }

    /// Empty 200 response to a pre-flight request.
    pub fn preflight(cors: &CorsHeaders) -> Self {
        Self::new(200, cors, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn proxy_request_reads_http_method_and_keeps_metadata() {
        let event: ProxyRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/projects",
            "requestContext": { "stage": "prod" }
        }))
        .unwrap();

        assert_eq!(event.method(), Some("GET"));
        assert!(!event.is_preflight());
        assert_eq!(event.metadata["path"], "/projects");

        let logged = serde_json::to_value(&event).unwrap();
        assert_eq!(logged["httpMethod"], "GET");
        assert_eq!(logged["requestContext"]["stage"], "prod");
    }

    #[test]
    fn event_without_method_is_not_preflight() {
        let event: ProxyRequest = serde_json::from_value(json!({})).unwrap();

        assert!(event.http_method.is_none());
        assert!(!event.is_preflight());
    }

    #[test]
    fn non_string_method_is_accepted_and_not_preflight() {
        for method in [json!(123), json!(["OPTIONS"]), json!({"verb": "OPTIONS"})] {
            let event: ProxyRequest =
                serde_json::from_value(json!({ "httpMethod": method, "path": "/" })).unwrap();

            assert_eq!(event.http_method, Some(method));
            assert_eq!(event.method(), None);
            assert!(!event.is_preflight());
        }
    }

    #[test]
    fn response_serializes_in_proxy_shape() {
        let response = ApiResponse::preflight(&CorsHeaders::default());

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "headers": {
                    "Content-Type": "application/json",
                    "Access-Control-Allow-Origin": "*",
                    "Access-Control-Allow-Methods": "GET, OPTIONS",
                    "Access-Control-Allow-Headers":
                        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token"
                },
                "body": ""
            })
        );
    }
}
