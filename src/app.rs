use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use queries::AlbumStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::endpoint_handlers::{
    add_album, delete_album, get_album, get_albums, update_album, update_album_score,
};
use crate::error::ApiError;

const BODY_LIMIT: usize = 50 * 1024 * 1024;
const CORS_MAX_AGE: Duration = Duration::from_secs(500);

#[derive(Clone)]
pub struct DatabaseState {
    pub store: Arc<dyn AlbumStore>,
}

impl DatabaseState {
    pub fn new(store: Arc<dyn AlbumStore>) -> Self {
        Self { store }
    }
}

pub fn create_router(state: DatabaseState) -> Router {
    // Methods a path does not serve get the same answer as unknown paths.
    let collection = get(get_albums).post(add_album).fallback(unknown_route);

    Router::new()
        .route("/album", collection.clone())
        .route("/album/", collection)
        .route(
            "/album/:id",
            get(get_album)
                .put(update_album)
                .delete(delete_album)
                .fallback(unknown_route),
        )
        .route(
            "/album/update-score/:id",
            put(update_album_score).fallback(unknown_route),
        )
        .fallback(unknown_route)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn unknown_route(method: Method, uri: Uri) -> ApiError {
    ApiError::UnknownRoute(format!("{} {}", method, uri.path()))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE)
}

/// Last resort for a handler that panicked instead of answering.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.to_owned()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(detail).into_response()
}
