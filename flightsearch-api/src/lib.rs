use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod error;
pub mod flights;
pub mod state;
pub mod token;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin(state.allowed_origin.as_deref()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(token::routes())
        .merge(flights::routes())
        .merge(airports::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn allowed_origin(origin: Option<&str>) -> AllowOrigin {
    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            tracing::warn!("Invalid CORS origin configured, allowing any origin");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    }
}
