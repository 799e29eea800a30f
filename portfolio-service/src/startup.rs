//! Application startup and lifecycle management.

use crate::config::{CorsConfig, PortfolioConfig, StoreBackend};
use crate::handlers;
use crate::services::{DocumentStore, InMemoryStore, MongoStore};
use crate::ApiDoc;
use axum::{
    http::{HeaderValue, Request},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state.
///
/// `store` is `None` when the deployment runs without a store adapter.
#[derive(Clone)]
pub struct AppState {
    pub config: PortfolioConfig,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: PortfolioConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { config, store }
    }
}

/// Construct the configured store adapter. Never fails: a store that cannot
/// be set up is reported by the diagnostic endpoint instead.
pub async fn build_store(config: &PortfolioConfig) -> Option<Arc<dyn DocumentStore>> {
    let database = &config.database;
    match database.backend {
        StoreBackend::Disabled => {
            tracing::warn!("Database backend disabled; contact endpoints will fail");
            None
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Some(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Mongodb => {
            let (Some(url), Some(name)) = (database.url.as_deref(), database.name.as_deref())
            else {
                tracing::warn!(
                    url_set = database.url.is_some(),
                    name_set = database.name.is_some(),
                    "DATABASE_URL or DATABASE_NAME not set; MongoDB store left uninitialized"
                );
                return Some(Arc::new(MongoStore::uninitialized()));
            };

            let timeout = Duration::from_secs(database.server_selection_timeout_secs);
            match MongoStore::connect(url, name, timeout).await {
                Ok(store) => {
                    // Best effort: the database may be down at boot.
                    if let Err(e) = store.initialize_indexes().await {
                        tracing::warn!("Failed to initialize database indexes: {}", e);
                    }
                    Some(Arc::new(store))
                }
                Err(e) => {
                    tracing::error!("Failed to set up MongoDB store: {}", e);
                    Some(Arc::new(MongoStore::uninitialized()))
                }
            }
        }
    }
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(cors.allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Ignoring invalid CORS origin '{}': {}", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::test_database))
        .route(
            "/api/contact",
            get(handlers::list_contacts).post(handlers::submit_contact),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_endpoint))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PortfolioConfig) -> Result<Self, AppError> {
        let store = build_store(&config).await;
        Self::with_store(config, store).await
    }

    /// Build around an already constructed store handle.
    pub async fn with_store(
        config: PortfolioConfig,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Portfolio service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
