//! Application startup and lifecycle management.
//!
//! Builds the HTTP router for the essay endpoint plus health, readiness and
//! metrics routes, and binds the listener.

use crate::config::EssayConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EssayConfig>,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Essay length is unbounded; oversized essays fail at the API instead
        .route(
            "/api/check-essay",
            post(handlers::check_essay)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(CatchPanicLayer::custom(handlers::handle_essay_panic)),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        // Browser clients may call from any origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider from `config`.
    pub async fn build(config: EssayConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
            base_url: config.google.api_base_url.clone(),
        };
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(GeminiTextProvider::new(gemini_config).map_err(|e| {
                tracing::error!("Failed to initialize Gemini provider: {}", e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?);

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an existing provider.
    pub async fn build_with_provider(
        config: EssayConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Essay service listening on port {}", port);

        let state = AppState {
            config: Arc::new(config),
            text_provider,
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending::<()>()).await
    }

    /// Run the application until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
