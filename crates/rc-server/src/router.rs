//! Axum router construction.
//!
//! Builds the application router with the media routes, their `/api`
//! aliases, the catalog listing, middleware layers and optional static file
//! serving.

use axum::http::{header, Method};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([
            header::CONTENT_RANGE,
            header::CONTENT_LENGTH,
            header::ACCEPT_RANGES,
        ])
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let static_dir = ctx.config.server.static_dir.clone();

    let api = Router::new()
        .route("/stream/video/{id}", get(routes::media::stream_media))
        .route("/caption/{id}", get(routes::captions::get_caption))
        .route("/preview/{id}", get(routes::preview::get_preview))
        .route("/catalog", get(routes::catalog::list_assets))
        .route("/catalog/{id}", get(routes::catalog::get_asset));

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/media/{id}", get(routes::media::stream_media))
        .route("/captions/{id}", get(routes::captions::get_caption))
        .route("/preview/{id}", get(routes::preview::get_preview))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for a bundled web client.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(tower_http::services::ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {:?} does not exist; not serving it", dir);
        }
    }

    app
}
