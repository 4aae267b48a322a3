use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// How long in-flight requests and the MongoDB client get to wind down.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(
        database = config.mongodb.database(),
        "MongoDB connection established"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };
    let api_routes = api::routes(&state);

    // The routers hold their own handles; main keeps the pieces it still
    // needs for serving and cleanup.
    let AppState {
        config,
        mongo_client,
        ..
    } = state;

    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(config.app));

    info!("items-api listening on {}", config.server.address());

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Closing MongoDB client");
        drop(mongo_client);
    })
    .await
    .map_err(|e| eyre::eyre!("server error: {e}"))?;

    info!("items-api stopped");
    Ok(())
}
