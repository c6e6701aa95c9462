//! Web server for CloudDrop.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::Database;
use crate::file::FileStorage;
use crate::{CloudDropError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_static_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
    /// Static frontend settings.
    serve_static: bool,
    static_path: String,
}

impl WebServer {
    /// Create a new web server from configuration and ready collaborators.
    pub fn new(config: &Config, db: Database, storage: FileStorage) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                CloudDropError::Config(format!("invalid web server address: {e}"))
            })?;

        let app_state = AppState::new(db, storage)
            .with_password_params(crate::auth::PasswordParams {
                memory_kib: config.auth.argon2_memory_kib,
                iterations: config.auth.argon2_iterations,
                parallelism: config.auth.argon2_parallelism,
            })
            .with_max_upload_size(config.max_upload_size());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
            serve_static: config.server.serve_static,
            static_path: config.server.static_path.clone(),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        let mut router = create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router());

        if self.serve_static {
            if let Some(static_router) = create_static_router(&self.static_path) {
                router = router.merge(static_router);
            }
        }

        router
    }

    /// Run the web server until it fails or the process exits.
    pub async fn run(self) -> std::io::Result<()> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_server() -> (TempDir, WebServer) {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // random port

        let db = Database::open_in_memory().await.unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();

        let server = WebServer::new(&config, db, storage).unwrap();
        (temp_dir, server)
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let (_tmp, server) = create_test_server().await;
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_binds_random_port() {
        let (_tmp, server) = create_test_server().await;
        let addr = server.run_with_addr().await.unwrap();

        assert_ne!(addr.port(), 0);
    }
}
