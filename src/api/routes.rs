use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Build the API router. Mounted under `/api` by the binary.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(crate::api::handlers::health::health))
        .route("/research", post(crate::api::handlers::research::research))
}
