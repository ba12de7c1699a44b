use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use manus_web::config::Config;
use manus_web::routes;
use manus_web::shutdown::shutdown_signal;
use manus_web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    manus_web::init_tracing();

    let (config, loaded_from) = Config::discover("MANUS_WEB_CONFIG")?;
    match loaded_from {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let app_state = AppState::new(config.clone());
    if config.agent.eager_init {
        app_state.warm_up().await;
    }

    let app = routes::create_routes(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting Manus web interface on {}", addr);
    info!("Interface: http://localhost:{}", config.server.port);
    info!("API: http://localhost:{}/api/", config.server.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
