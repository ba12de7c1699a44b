use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue,
    },
    Router,
};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::PreviewConfig;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Directory '{0}' not found. Run this from the project root.")]
    DirectoryNotFound(PathBuf),

    #[error("File '{0}' not found.")]
    IndexNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Opens a URL in a browser. Failure is reported, never fatal.
pub type BrowserLauncher = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Static file server for previewing the web UI.
///
/// Construction validates the directory, so a `PreviewServer` that exists
/// is always able to serve `index.html`.
pub struct PreviewServer {
    config: PreviewConfig,
    root: PathBuf,
    launcher: BrowserLauncher,
}

impl std::fmt::Debug for PreviewServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewServer")
            .field("config", &self.config)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl PreviewServer {
    pub fn new(config: PreviewConfig) -> Result<Self, PreviewError> {
        let root = PathBuf::from(&config.directory);
        if !root.is_dir() {
            return Err(PreviewError::DirectoryNotFound(root));
        }

        let index = root.join("index.html");
        if !index.is_file() {
            return Err(PreviewError::IndexNotFound(index));
        }

        let root = root.canonicalize()?;
        Ok(Self {
            config,
            root,
            launcher: Arc::new(|url: &str| opener::open_browser(url).map_err(|e| e.to_string())),
        })
    }

    pub fn with_launcher(mut self, launcher: BrowserLauncher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Serves the directory verbatim with CORS headers on every response.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback_service(ServeDir::new(&self.root))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), PreviewError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.run(listener, shutdown).await
    }

    /// Announce, open the browser, and serve on an already bound listener.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), PreviewError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let url = format!("http://localhost:{}", local_addr.port());
        info!("Preview server started on {}", local_addr);
        info!("Open: {}", url);
        info!("Serving files from: {}", self.root.display());
        info!("Press Ctrl+C to stop");

        if self.config.open_browser {
            self.open_browser(&url).await;
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Preview server stopped");
        Ok(())
    }

    async fn open_browser(&self, url: &str) {
        let launcher = self.launcher.clone();
        let target = url.to_string();
        // The platform opener may block until the browser process reports back.
        let result = tokio::task::spawn_blocking(move || launcher(&target))
            .await
            .unwrap_or_else(|e| Err(e.to_string()));

        match result {
            Ok(()) => info!("Opening browser..."),
            Err(e) => {
                warn!("Could not open a browser: {}", e);
                info!("Open this address manually: {}", url);
            }
        }
    }
}
