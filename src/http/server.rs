//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all API handler
//! - Wire up middleware (CORS headers, tracing, request ID, timeout)
//! - Bind server to listener
//! - Dispatch requests through the route table to handlers
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::ai::CompletionService;
use crate::config::{AiConfig, AppConfig, EmailConfig};
use crate::handlers;
use crate::http::error::ApiError;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{preflight, CORS_HEADERS};
use crate::notify::Notifier;
use crate::observability::metrics;
use crate::routing::Router as ApiRouter;
use crate::store::KvStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ApiRouter>,
    pub store: Arc<dyn KvStore>,
    pub completion: Arc<dyn CompletionService>,
    /// `None` when no email credential is configured.
    pub notifier: Option<Arc<dyn Notifier>>,
    pub ai: AiConfig,
    pub email: EmailConfig,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Assemble state from configuration and already-built collaborators.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn KvStore>,
        completion: Arc<dyn CompletionService>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            router: Arc::new(ApiRouter::from_config(&config.routes)),
            store,
            completion,
            notifier,
            ai: config.ai.clone(),
            email: config.email.clone(),
            max_body_bytes: config.listener.max_body_bytes,
        }
    }
}

/// HTTP server for the planner API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: AppConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route("/{*path}", any(api_handler))
        .route("/", any(api_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer());

    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
}

/// Main API handler.
/// Looks up the route once and runs its action.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::OPTIONS {
        return preflight();
    }

    let Some(route) = state.router.match_request(&method, &path) else {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "No route matched"
        );
        metrics::record_request("none", method.as_str(), 404, start_time);
        return ApiError::NotFound.into_response();
    };
    let label = route.action.label();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        action = label,
        "Dispatching request"
    );

    let body = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            metrics::record_request(label, method.as_str(), 413, start_time);
            return ApiError::PayloadTooLarge.into_response();
        }
    };

    let response = match handlers::dispatch(&state, &route, body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(request_id = %request_id, action = label, "Handler returned error");
            e.into_response()
        }
    };

    metrics::record_request(label, method.as_str(), response.status().as_u16(), start_time);
    response
}
