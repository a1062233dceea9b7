//! HTTP surface for the ethscope view state.
//!
//! Renders the overview (homepage) from whatever slots are populated, drives
//! block selection for the detail view, and exposes a health endpoint.

/// Route handlers
pub mod routes;
/// JSON response types
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get},
};
use eyre::Result;
use provider::ChainDataApi;
use snapshot::{SelectionController, SharedState};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(routes::health, routes::overview, routes::select_block, routes::clear_selection),
    components(
        schemas(
            types::OverviewResponse,
            types::TransactionsPreview,
            types::FirstTransactionView,
            types::SelectedBlockResponse,
            types::HealthResponse,
            types::ErrorResponse
        )
    ),
    tags(
        (name = "ethscope", description = "ethscope API endpoints")
    ),
    info(
        title = "ethscope API",
        description = "API for the ethscope Ethereum chain overview",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) view: SharedState,
    pub(crate) selection: SelectionController,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`] around the shared view state and the
    /// injected provider client.
    pub fn new(view: SharedState, client: Arc<dyn ChainDataApi>) -> Self {
        let selection = SelectionController::new(client, view.clone());
        Self { view, selection }
    }
}

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = Arc::clone(&allowed);
            move |origin: &HeaderValue, _| match origin.to_str() {
                Ok(origin) => {
                    allowed.iter().any(|o| o == origin)
                        || origin.starts_with("http://localhost:")
                        || origin.starts_with("http://127.0.0.1:")
                }
                Err(_) => false,
            }
        }))
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/overview", get(routes::overview))
        .route("/blocks/:number", get(routes::select_block))
        .route("/selection", delete(routes::clear_selection))
        .with_state(state);

    Router::new()
        .route("/health", get(routes::health))
        .nest(&format!("/{API_VERSION}"), api)
        .layer(cors)
        .layer(trace)
}

/// Run the API server on the given address.
pub async fn run(addr: SocketAddr, state: ApiState, allowed_origins: Vec<String>) -> Result<()> {
    let app = router(state, allowed_origins);

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
