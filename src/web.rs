//! Page shell, embedded static assets and the HTML error pages.
use std::any::Any;

use axum::{
    Router,
    body::Body,
    extract::OriginalUri,
    http::{Method, Response, StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use rust_embed::RustEmbed;

use crate::error::AppError;

#[derive(RustEmbed)]
#[folder = "public"]
struct EmbeddedPublic;

/// Pages of the dashboard; all of them are rendered client-side from the
/// same shell.
pub const PAGES: [&str; 4] = ["/", "/zones", "/statistics", "/settings"];

pub fn create_router() -> Router {
    let shell = get(page_shell).head(page_shell);
    PAGES
        .iter()
        .fold(Router::new(), |router, page| router.route(page, shell.clone()))
        .fallback(asset_handler)
}

async fn page_shell(method: Method) -> Response<Body> {
    embedded_response("index.html", &method).unwrap_or_else(|| not_found_page().into_response())
}

async fn asset_handler(method: Method, OriginalUri(uri): OriginalUri) -> Response<Body> {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path().trim_start_matches('/');
    if path.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    embedded_response(path, &method).unwrap_or_else(|| not_found_page().into_response())
}

fn embedded_response(path: &str, method: &Method) -> Option<Response<Body>> {
    if path.is_empty() {
        return None;
    }
    let asset = EmbeddedPublic::get(path)?;
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(asset.data.into_owned())
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CACHE_CONTROL,
            if path == "index.html" {
                "no-cache"
            } else {
                "public, max-age=3600"
            },
        )
        .header(header::REFERRER_POLICY, "no-referrer")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(body)
        .ok()
}

fn error_page(title: &str, message: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title} - NDash</title><link rel=\"stylesheet\" href=\"/css/app.css\"></head>\
         <body class=\"error-page\"><main><h1>{title}</h1><p>{message}</p>\
         <p><a href=\"/\">Back to dashboard</a></p></main></body></html>\n"
    ))
}

pub fn not_found_page() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, error_page("404 - Not Found", "Page not found"))
}

/// Turns a handler panic into a plain 500 instead of a dropped connection.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
