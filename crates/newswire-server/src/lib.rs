pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;

pub use config::{AppConfig, LoggingConfig, ServerConfig, StorageConfig};
pub use observability::{apply_logging_level, init_tracing};
pub use server::{AppState, NewswireServer, ServerBuilder, build_app};
