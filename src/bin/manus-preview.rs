use anyhow::Result;
use tracing::{error, info};

use manus_web::config::Config;
use manus_web::preview::PreviewServer;
use manus_web::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> Result<()> {
    manus_web::init_tracing();

    let (config, loaded_from) = Config::discover("MANUS_PREVIEW_CONFIG")?;
    if let Some(path) = loaded_from {
        info!("Loaded configuration from: {}", path);
    }

    // Startup checks run before anything is bound.
    let server = match PreviewServer::new(config.preview) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    server.serve(shutdown_signal()).await?;
    Ok(())
}
