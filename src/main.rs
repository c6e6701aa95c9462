use tracing::info;

use clouddrop::db::Database;
use clouddrop::file::FileStorage;
use clouddrop::{Config, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = clouddrop::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        clouddrop::logging::init_console_only(&config.logging.level);
    }

    info!("CloudDrop starting");

    // Connect to persistence before accepting any traffic
    let db = match Database::open(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let storage = match FileStorage::new(&config.storage.path) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Failed to initialize upload storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Upload storage initialized at: {}", config.storage.path);

    let server = match WebServer::new(&config, db, storage) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to configure web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
