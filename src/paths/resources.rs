//src/paths/resources.rs
use axum::{Json, Router, routing::get, extract::Path, http::StatusCode};
use std::sync::Arc;
use tracing::info;
use crate::load_resources::AppState;
use crate::utils::serializer::success_response;

// Define the GET /api/tokens route
pub async fn get_tokens(state: Arc<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    info!("Received GET request for /api/tokens");
    Ok(Json(success_response(serde_json::json!(state.tokens.all()))))
}

// Define the GET /api/tokens/:chain_id/*address route; `address` may be an
// IBC denom such as `ibc/<hash>`
pub async fn get_token(
    state: Arc<AppState>,
    chain_id: u64,
    address: String,
) -> Result<Json<serde_json::Value>, StatusCode> {
    info!("Received GET request for /api/tokens/{}/{}", chain_id, address);
    match state.tokens.get(chain_id, &address) {
        Some(token) => Ok(Json(success_response(serde_json::json!(token)))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// Create a router for resource-related routes
pub fn create_resource_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tokens", get({
            let state = Arc::clone(&state);
            move || get_tokens(state)
        }))
        .route("/api/tokens/:chain_id/*address", get({
            let state = Arc::clone(&state);
            move |Path((chain_id, address)): Path<(u64, String)>| {
                get_token(state, chain_id, address)
            }
        }))
}
