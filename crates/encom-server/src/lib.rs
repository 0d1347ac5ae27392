//! HTTP front end for the invoice converter.
//!
//! Routes:
//! - `GET /` upload form
//! - `POST /upload` multipart PDF in, xlsx attachment out
//! - `GET /health` liveness probe

pub mod error;
pub mod handlers;
mod page;

pub use error::ApiError;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tracing::info;

use encom_core::models::config::{EncomConfig, ExportConfig, ServerConfig};
use encom_core::{InvoiceParser, PdfExtractor, PdfProcessor};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<dyn PdfProcessor>,
    pub parser: Arc<InvoiceParser>,
    pub export: ExportConfig,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the state from a loaded configuration using the lopdf/pdf-extract backend.
    pub fn from_config(config: &EncomConfig) -> Self {
        Self {
            processor: Arc::new(PdfExtractor::new().with_max_pages(config.pdf.max_pages)),
            parser: Arc::new(InvoiceParser::from_config(config.extraction.clone())),
            export: config.export.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/health", get(handlers::health_check))
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(limit)))
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Upload limit: {} bytes", state.max_upload_bytes);

    axum::serve(listener, router(state)).await
}
