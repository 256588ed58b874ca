//! # HTTP Server
//!
//! Mounts the bookings API, the root and health routes, the JSON 404 and
//! 405 fallbacks, and the panic, tracing and CORS layers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::rest_api::{booking_routes, Envelope, SERVER_ERROR_MESSAGE};
use crate::store::BookingStore;

use super::config::ServerConfig;

/// HTTP Server for the bookings API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig, store: Arc<dyn BookingStore>) -> Self {
        let router = build_router(store, &config.cors_origins);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind and serve until Ctrl+C / SIGTERM
    pub async fn start(self) -> std::io::Result<()> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;

        info!(%addr, "bookings API listening");
        info!("bookings endpoints available at http://{}/api/bookings", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("bookings API stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(store: Arc<dyn BookingStore>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/bookings", booking_routes(store))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin);
    }

    let parsed: Vec<_> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin)
}

async fn root_handler() -> Json<Envelope<()>> {
    Json(Envelope::message("Synergia Bookings API is running"))
}

async fn health_handler() -> Json<Envelope<()>> {
    Json(Envelope::message("ok"))
}

async fn not_found_handler() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Route not found")),
    )
}

async fn method_not_allowed_handler() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Envelope::failure("Method not allowed")),
    )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::failure(SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(ServerConfig::with_port(8080), Arc::new(MemoryStore::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let origins = vec![
            "http://localhost:5173".to_string(),
            "not a header\nvalue".to_string(),
        ];
        let _router = build_router(Arc::new(MemoryStore::new()), &origins);
    }

    #[test]
    fn test_panic_response_is_envelope() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
