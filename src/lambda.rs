//! Lambda runtime adapter.
//!
//! API Gateway delivers the proxy event as JSON; the handler's response is
//! serialized back as the proxy response.

use crate::{
    db::ItemStore,
    handlers::projects::list_projects,
    models::api::{ApiResponse, CorsHeaders, ProxyRequest},
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use std::sync::Arc;

/// Handle one invocation.
///
/// Always `Ok`: failures are reported in the response body, not to the runtime.
pub async fn function_handler<S: ItemStore>(
    store: &S,
    cors: &CorsHeaders,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ApiResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Invocation started");

    Ok(list_projects(store, cors, &event.payload).await)
}

/// Poll the Lambda runtime API until the process is shut down.
pub async fn run<S: ItemStore + 'static>(store: Arc<S>, cors: CorsHeaders) -> Result<(), Error> {
    let cors = Arc::new(cors);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let store = Arc::clone(&store);
        let cors = Arc::clone(&cors);
        async move { function_handler(store.as_ref(), &cors, event).await }
    }))
    .await
}
