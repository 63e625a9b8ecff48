//! API router configuration.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    api_info, chart_data, chart_options, dashboard, dedup_table, edit_cell, export_table,
    fill_missing, get_table, health, preview_table, rename_columns, reset_session,
    session_status, upload_table, AppState,
};

/// Default upper bound for upload request bodies (32 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Create the API router with all routes configured.
pub fn create_router() -> Router {
    create_router_with_state(AppState::new())
}

/// Create the API router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    // Table routes: everything operating on the loaded table.
    let table_routes = Router::new()
        .route("/", post(upload_table).get(get_table))
        .route("/preview", get(preview_table))
        .route("/columns", put(rename_columns))
        .route("/cell", post(edit_cell))
        .route("/dedup", post(dedup_table))
        .route("/fill", post(fill_missing))
        .route("/chart", get(chart_data))
        .route("/chart/options", get(chart_options))
        .route("/export", get(export_table));

    // API v1 routes
    let api_v1 = Router::new()
        .route("/", get(api_info))
        .route("/session", get(session_status).delete(reset_session))
        .nest("/table", table_routes);

    // Build main router
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upper bound for upload request bodies, in bytes.
    pub max_upload_bytes: usize,
    /// Whether to stop gracefully on ctrl-c.
    pub graceful_shutdown: bool,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            graceful_shutdown: true,
        }
    }
}

/// Start the API server.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    serve_with_state(config, AppState::new()).await
}

/// Start the API server with custom state.
pub async fn serve_with_state(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let router =
        create_router_with_state(state).layer(DefaultBodyLimit::max(config.max_upload_bytes));

    tracing::info!("Starting csv-workbench API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(crate::error::WorkbenchError::Io)?;

    if config.graceful_shutdown {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    } else {
        axum::serve(listener, router).await
    }
    .map_err(crate::error::WorkbenchError::Io)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.max_upload_bytes, 32 * 1024 * 1024);
        assert!(config.graceful_shutdown);
    }

    #[test]
    fn test_server_config_custom() {
        let config = ServerConfig::new("0.0.0.0", 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        // Builder keeps the defaults for the rest.
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_router_creation() {
        let _router = create_router();
        // Router created successfully
    }
}
