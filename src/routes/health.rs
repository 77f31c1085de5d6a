//! Health check endpoint for container orchestration.
//!
//! Only mounted when `http.health_path` is configured; otherwise every path
//! serves quotes.

/// Liveness probe. Answers "ok" for any method while the process can serve HTTP.
pub async fn health() -> &'static str {
    "ok"
}
