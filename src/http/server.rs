//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (tracing, timeout, request ID, cache headers)
//! - Bind server to listener
//! - Resolve client address → region → destination per request
//! - Observability (metrics, correlation IDs)

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;

use crate::config::{DatabaseConfig, ServerConfig};
use crate::error::{LookupError, RedirectError};
use crate::geo::{lookup_file, LookupResult};
use crate::http::request::{client_address, request_id};
use crate::http::response::{redirect, validate_destination};
use crate::observability::metrics;
use crate::routing::RoutingPolicy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<RoutingPolicy>,
    pub database: Arc<DatabaseConfig>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            policy: Arc::new(RoutingPolicy::from_config(&config.catalog)),
            database: Arc::new(config.database.clone()),
        }
    }

    /// Look up `address` and pick its destination.
    ///
    /// Returns the destination label alongside the validated URL.
    pub async fn resolve(&self, address: String) -> Result<(String, Url), RedirectError> {
        let result = read_database(&self.database, address).await?;
        let destination = self.policy.decide(&result);
        let url = validate_destination(destination.url())?;
        Ok((destination.label().to_string(), url))
    }
}

/// Run one lookup on the blocking pool, bounded by the configured read timeout.
async fn read_database(database: &DatabaseConfig, address: String) -> Result<LookupResult, LookupError> {
    let path = database.path.clone();
    let source_name = path.display().to_string();
    let task = tokio::task::spawn_blocking(move || lookup_file(&path, &address));

    let joined = if database.read_timeout_ms == 0 {
        task.await
    } else {
        let limit = Duration::from_millis(database.read_timeout_ms);
        match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                return Err(LookupError::unavailable(
                    source_name,
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("read exceeded {} ms", database.read_timeout_ms),
                    ),
                ));
            }
        }
    };

    joined.map_err(|e| LookupError::unavailable(source_name, io::Error::other(e)))?
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            database = %self.config.database.path.display(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Resolve the caller's region and redirect to its destination.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let request_id = request_id(request.headers()).to_string();
    let address = client_address(request.headers(), peer);

    tracing::debug!(
        request_id = %request_id,
        client = %address,
        "Resolving client destination"
    );

    match state.resolve(address.clone()).await {
        Ok((label, url)) => {
            tracing::info!(
                request_id = %request_id,
                client = %address,
                destination = %label,
                url = %url,
                "Redirecting"
            );
            metrics::record_redirect(&label, 302, start_time);
            redirect(&url)
        }
        Err(e) => {
            let status = e.status_code();
            tracing::error!(
                request_id = %request_id,
                client = %address,
                error = %e,
                "Redirect failed"
            );
            metrics::record_redirect("none", status.as_u16(), start_time);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn state_with(path: std::path::PathBuf, catalog: CatalogConfig) -> AppState {
        let mut config = ServerConfig::default();
        config.database.path = path;
        config.catalog = catalog;
        AppState::from_config(&config)
    }

    #[tokio::test]
    async fn test_resolve_carrier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ipdata.txt");
        std::fs::write(&path, "1.0.0.0 1.0.0.255 中国–天津–天津–南开区 联通\n").unwrap();

        let state = state_with(path, CatalogConfig::default());
        let (label, url) = state.resolve("1.0.0.10".into()).await.unwrap();
        assert_eq!(label, "unicom");
        assert!(url.as_str().ends_with("tjcu.txt"));

        let (label, _) = state.resolve("9.9.9.9".into()).await.unwrap();
        assert_eq!(label, "generic");
    }

    #[tokio::test]
    async fn test_resolve_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().join("absent.txt"), CatalogConfig::default());
        let err = state.resolve("1.0.0.10".into()).await.unwrap_err();
        assert!(matches!(err, RedirectError::Lookup(LookupError::DatabaseUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_resolve_invalid_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ipdata.txt");
        std::fs::write(&path, "").unwrap();

        let catalog = CatalogConfig {
            generic_url: "iptv.txt".into(),
            ..CatalogConfig::default()
        };
        let err = state_with(path, catalog).resolve("1.0.0.10".into()).await.unwrap_err();
        assert!(matches!(err, RedirectError::InvalidDestinationUrl { .. }));
    }

    #[tokio::test]
    async fn test_resolve_without_read_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ipdata.txt");
        std::fs::write(&path, "1.0.0.0 1.0.0.255 中国–天津–天津–河西区 电信\n").unwrap();

        let mut config = ServerConfig::default();
        config.database.path = path;
        config.database.read_timeout_ms = 0;
        let server = HttpServer::new(config);
        assert_eq!(server.config().database.read_timeout_ms, 0);

        let state = AppState::from_config(server.config());
        let (label, _) = state.resolve("1.0.0.1".into()).await.unwrap();
        assert_eq!(label, "telecom");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_database_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ipdata.txt");
        let status = std::process::Command::new("mkfifo").arg(&path).status().unwrap();
        assert!(status.success());

        let mut config = ServerConfig::default();
        config.database.path = path.clone();
        config.database.read_timeout_ms = 200;
        let state = AppState::from_config(&config);

        // Opening a FIFO for reading blocks until a writer shows up.
        let err = state.resolve("1.0.0.1".into()).await.unwrap_err();
        assert!(matches!(err, RedirectError::Lookup(LookupError::DatabaseUnavailable { .. })));
        assert!(err.to_string().contains("read exceeded 200 ms"), "{err}");

        // Release the blocked reader so the runtime can shut down.
        let writer = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        drop(writer);
    }
}
