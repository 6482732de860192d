//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all auth API handlers
//! - Wire up middleware (tracing, timeout, body limit, metrics)
//! - Serve the listener with graceful shutdown
//!
//! # Design Decisions
//! - The route table is built once in the constructor and never changes
//! - The access control service is injected as a trait object; the
//!   server owns no state beyond the router itself

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::access::AccessControlService;
use crate::api;
use crate::config::ServerConfig;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<dyn AccessControlService>,
}

/// HTTP server for the auth API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server over the given access control service.
    pub fn new(config: &ServerConfig, access: Arc<dyn AccessControlService>) -> Self {
        let state = AppState { access };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        api::auth_router(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(middleware::from_fn(track_metrics))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// ctrl-c or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(crate::lifecycle::shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record request metrics around the inner handler.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    metrics::record_request(method.as_str(), &path, response.status().as_u16(), start);
    response
}
