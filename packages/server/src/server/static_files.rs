use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Registration page (plain HTML/JS, no build step), embedded at compile time
#[derive(RustEmbed)]
#[folder = "web"]
pub struct WebAssets;

/// Serve the registration page from embedded assets
pub async fn serve_web_app(uri: Uri) -> Response {
    serve_asset::<WebAssets>(uri.path())
}

/// Look up an embedded file, falling back to index.html for page paths
fn serve_asset<E: RustEmbed>(path: &str) -> Response {
    let path = path.trim_start_matches('/');

    // Unknown API paths must not turn into the HTML page
    if path.starts_with("rest/") || path == "rest" {
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    }

    // If path is empty, serve index.html
    let path = if path.is_empty() { "index.html" } else { path };

    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => match E::get("index.html") {
            Some(content) => ([(header::CONTENT_TYPE, "text/html")], content.data).into_response(),
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        },
    }
}
