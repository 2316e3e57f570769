use std::{env, sync::Arc};

use newswire_db_mongo::MongoStore;
use newswire_server::config::loader::load_config;
use newswire_server::ServerBuilder;

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From NEWSWIRE_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (newswire.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (NEWSWIRE_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else), so that the
    // port and store credentials can come from the environment.
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level
    newswire_server::observability::init_tracing();

    let (config_path, source) = resolve_config_path();

    let cfg = match load_config(Some(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        path = %config_path,
        source = %source,
        "Configuration loaded"
    );

    newswire_server::observability::apply_logging_level(&cfg.logging.level);

    // Open the store connection once; every request shares it.
    let store = match MongoStore::new(cfg.storage.mongo.clone()).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Store connection failed: {e}");
            std::process::exit(2);
        }
    };

    let server = match ServerBuilder::new()
        .with_config(&cfg)
        .with_store(Arc::new(store))
        .build()
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Server initialization failed: {e}");
            std::process::exit(2);
        }
    };

    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
    }
}

/// Resolve the configuration file path.
///
/// Priority order:
/// 1. CLI argument: --config <path>
/// 2. Environment variable: NEWSWIRE_CONFIG
/// 3. Default: newswire.toml
fn resolve_config_path() -> (String, ConfigSource) {
    // 1. Check CLI: --config <path>
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return (path, ConfigSource::CliArgument);
            }
        }
    }

    // 2. Check environment variable
    if let Ok(path) = env::var("NEWSWIRE_CONFIG") {
        if !path.is_empty() {
            return (path, ConfigSource::EnvironmentVariable);
        }
    }

    // 3. Default to newswire.toml
    ("newswire.toml".to_string(), ConfigSource::Default)
}
