use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::{debug, info};

use crate::storage::StateStore;

pub mod api;
pub mod routes;

pub type SharedStore = Arc<dyn StateStore>;

impl IntoResponse for routes::HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

async fn dispatch(
    State(store): State<SharedStore>,
    method: Method,
    uri: Uri,
    body: String,
) -> routes::HttpResponse {
    let response = routes::route_request(method.as_str(), uri.path(), &body, store.as_ref());
    debug!(%method, path = uri.path(), status = response.status_code, "handled request");
    response
}

/// Every path goes through [routes::route_request].
pub fn router(store: SharedStore) -> Router {
    Router::new().fallback(dispatch).with_state(store)
}

pub async fn serve(bind_addr: &str, store: SharedStore) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("spyglass server listening on http://{bind_addr}");
    axum::serve(listener, router(store)).await
}

/// Blocking entry point for the CLI.
pub fn run_server(bind_addr: &str, store: SharedStore) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(bind_addr, store))
}
