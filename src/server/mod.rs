use crate::config::Config;
use crate::streaming::{self, StorageRoot};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod error;

/// Shared application context
///
/// Built once at startup and cloned into every handler; nothing in it is
/// mutated afterwards.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Canonicalized root that `/stream` resolves filenames against
    pub storage: Arc<StorageRoot>,
}

impl AppContext {
    /// Prepare storage directories and build the context.
    pub fn new(config: Config) -> Result<Self> {
        if config.storage.create_dirs {
            for dir in [&config.storage.videos_dir, &config.storage.media_dir] {
                ensure_dir(dir)?;
            }
        }

        let storage = StorageRoot::new(&config.storage.videos_dir)
            .context("Failed to open video storage root")?;
        tracing::info!("Serving videos from {:?}", storage.path());

        Ok(Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {:?}", dir))?;
        tracing::info!("Created directory {:?}", dir);
    }
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers([header::RANGE, header::CONTENT_TYPE])
        .expose_headers([
            header::CONTENT_RANGE,
            header::ACCEPT_RANGES,
            header::CONTENT_LENGTH,
        ]);

    let media_dir = ctx.config.storage.media_dir.clone();
    let static_dir = ctx.config.server.static_dir.clone();

    let mut app = Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/stream", streaming::stream_router())
        // Thumbnails and other uploaded assets
        .nest_service("/media", ServeDir::new(&media_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Serve static files if directory is provided
    // Uses SPA fallback: serves index.html for any route that doesn't match a file
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    app
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::new(config)?;
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
