use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use tokio::task;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{TraceLayer, DefaultMakeSpan};
use tracing::{info, Level, Span};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use axum::{Server, Router};
use axum::http::Request;
use balance_api::api::create_api_routes;
use balance_api::load_resources::{create_app_state, load_settings, reload_tokens};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;

    // RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    // Initialize tracing for logging
    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_target(true)
            .pretty())
        .with(filter)
        .init();

    // Create the AppState with tokens loaded from the configured token list
    let state = Arc::new(create_app_state(settings)?);

    // Spawn a background task to reload the token list on an interval
    let state_clone = Arc::clone(&state);
    task::spawn(async move {
        reload_tokens(state_clone).await;
    });

    // Create all routes by calling `create_api_routes`
    let app = Router::new()
        .merge(create_api_routes(Arc::clone(&state)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http()
                    .on_request(|request: &Request<_>, _span: &Span| {
                        tracing::info!(
                            "Received a request: {} {}",
                            request.method(),
                            request.uri().path()
                        );
                    })
                    .make_span_with(DefaultMakeSpan::new()
                        .level(Level::INFO)
                    )
                )
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr: SocketAddr = state.settings.listen_address.parse()
        .with_context(|| format!("Invalid listen address: {}", state.settings.listen_address))?;
    info!("Server running on http://{}", addr);

    let server = Server::bind(&addr).serve(app.into_make_service());

    // Use tokio::select to run the server and handle a shutdown signal
    tokio::select! {
        result = server => result.context("Server error")?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
