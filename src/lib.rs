pub mod agent;
pub mod chat_history;
pub mod config;
pub mod error;
pub mod handlers;
pub mod preview;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod templates;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("manus_web=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
