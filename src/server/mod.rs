//! Static asset server for the built frontend.

mod logging;

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub use logging::log_requests;

/// Serves files under `static_dir`; any path that is not a file gets
/// `index_file` so client-side routes resolve.
pub fn static_router(static_dir: impl AsRef<Path>, index_file: impl AsRef<Path>) -> Router {
    let assets =
        ServeDir::new(static_dir.as_ref()).fallback(ServeFile::new(index_file.as_ref()));

    let router = Router::new()
        .fallback_service(assets)
        .layer(axum::middleware::from_fn(log_requests));

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router
}
