//! HTTP routes.
//!
//! The quote handler is the router fallback, so it answers every method on every
//! path. The only other route is the optional liveness probe. All responses are
//! marked `Cache-Control: no-store` and run inside a request-id span.

pub mod health;
pub mod quote;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the quote fallback and optional health route.
pub fn create_router(state: AppState) -> Router {
    let health_path = state.config.http.health_path.clone();

    let mut router: Router<AppState> = Router::new().fallback(quote::random_quote);

    if let Some(path) = health_path {
        router = router.route(&path, any(health::health));
    }

    router
        .with_state(state)
        // Every response is a fresh draw or a live probe; never cache either
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
