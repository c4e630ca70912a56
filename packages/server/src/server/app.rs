//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    create_member_handler, get_member_handler, health_handler, list_members_handler,
};
use crate::server::static_files::serve_web_app;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: ServerDeps,
}

/// Build the CORS layer; an empty origin list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// REST endpoints live under `/rest/members`; every other GET path serves the
/// embedded registration page.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    tracing::info!(store = deps.member_store.backend(), "Building application router");

    let app_state = AxumAppState { deps };

    Router::new()
        .route(
            "/rest/members",
            get(list_members_handler).post(create_member_handler),
        )
        .route("/rest/members/:id", get(get_member_handler))
        // Health check
        .route("/health", get(health_handler))
        // Registration page and its assets
        .fallback(serve_web_app)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
