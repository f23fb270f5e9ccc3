//! Local HTTP server.
//!
//! Outside Lambda the same handler is served by axum: each request is turned
//! into a proxy event, passed to [`handlers::projects::list_projects`], and
//! the proxy response is written back as a plain HTTP response.

use crate::{
    db::ItemStore,
    handlers,
    models::api::{ApiResponse, CorsHeaders, ProxyRequest},
};
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every request.
pub struct AppState<S> {
    store: Arc<S>,
    cors: Arc<CorsHeaders>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cors: Arc::clone(&self.cors),
        }
    }
}

/// Build the router.
///
/// # Routes
///
/// - `/` and `/projects` (any method) - project listing
/// - `GET /health` - liveness, never touches the table
pub fn router<S: ItemStore + 'static>(store: Arc<S>, cors: CorsHeaders) -> Router {
    let state = AppState {
        store,
        cors: Arc::new(cors),
    };

    Router::new()
        // Public liveness check
        .route("/health", get(handlers::health::health_check))
        // Every method goes to the handler, which answers OPTIONS itself
        .route("/", any(proxy::<S>))
        .route("/projects", any(proxy::<S>))
        // Request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn proxy<S: ItemStore + 'static>(
    State(state): State<AppState<S>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let event = proxy_event(&method, &uri, &headers);
    let response =
        handlers::projects::list_projects(state.store.as_ref(), &state.cors, &event).await;

    into_http(response)
}

/// Describe an HTTP request the way API Gateway would.
fn proxy_event(method: &Method, uri: &Uri, headers: &HeaderMap) -> ProxyRequest {
    let mut event = ProxyRequest::with_method(method.as_str());

    // Non-UTF-8 header values are dropped
    let headers: Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), Value::String(value.to_string())))
        })
        .collect();

    event
        .metadata
        .insert("path".to_string(), Value::String(uri.path().to_string()));
    event
        .metadata
        .insert("headers".to_string(), Value::Object(headers));
    event
}

fn into_http(response: ApiResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Copy the proxy headers onto the HTTP response
    let mut builder = axum::http::Response::builder().status(status);
    for (name, value) in response.headers.pairs() {
        builder = builder.header(name, value);
    }

    builder.body(Body::from(response.body)).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Invalid response header");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}
