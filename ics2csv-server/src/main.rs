mod routes;
mod state;

use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use ics2csv_core::Ics2CsvConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ics2csv_server=info,ics2csv_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Ics2CsvConfig::load()?;
    let addr = config.server.addr.clone();
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ics2csv-server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the router with all endpoints and middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_upload_bytes;

    Router::new()
        .merge(routes::convert::router())
        .merge(routes::health::router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
