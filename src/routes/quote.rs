//! Random quote handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// JSON body of a quote response: `{"quote": "..."}`.
#[derive(Debug, Serialize)]
pub struct QuoteBody<'a> {
    pub quote: &'a str,
}

/// Answers any request with a uniformly chosen quote.
///
/// Installed as the router fallback, so method, path, headers and body are all
/// ignored. The body goes through serde_json, which escapes quotes, backslashes
/// and control characters in the catalog text.
#[instrument(name = "quote::random_quote", skip_all)]
pub async fn random_quote(State(state): State<AppState>) -> Response {
    let quote = state.catalog.choose();
    tracing::debug!(quote_len = quote.len(), "Selected quote");
    Json(QuoteBody { quote }).into_response()
}
