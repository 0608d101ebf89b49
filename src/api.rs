//src/api.rs
use axum::Router;
use std::sync::Arc;
use crate::load_resources::AppState;
use crate::paths::resources::create_resource_routes;
use crate::paths::amounts::create_amount_routes;
use crate::paths::lending::create_lending_routes;

pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_resource_routes(Arc::clone(&state)))
        .merge(create_amount_routes(Arc::clone(&state)))
        .merge(create_lending_routes())
}
