use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use newswire_storage::DocumentStore;

use crate::{config::AppConfig, handlers};

/// Shared state injected into every handler: the store handle, opened
/// once at startup. Handlers receive it explicitly rather than
/// capturing a global, which keeps them testable against any backend.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

pub struct NewswireServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(store: Arc<dyn DocumentStore>) -> Router {
    let state = AppState { store };
    Router::new()
        .route("/", get(handlers::root))
        // Categories
        .route("/categories", get(handlers::list_categories))
        .route("/categories/{id}", get(handlers::news_by_category))
        // News
        .route("/news-details/{id}", get(handlers::news_details))
        .route("/news-by-same-author/{id}", get(handlers::news_by_author))
        .route("/post-news", post(handlers::post_news))
        .route("/update-news/{id}", patch(handlers::update_news))
        .route("/delete-news/{id}", delete(handlers::delete_news))
        // Users
        .route("/users", get(handlers::list_users))
        .route(
            "/user-role/{id}",
            get(handlers::get_user_role).patch(handlers::set_user_role),
        )
        .with_state(state)
        // Middleware stack: blanket CORS (the API has always allowed any origin), then request tracing
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
}

pub struct ServerBuilder {
    addr: SocketAddr,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            store: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: &AppConfig) -> Self {
        self.addr = cfg.addr();
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// # Errors
    ///
    /// Fails if no store handle was supplied.
    pub fn build(self) -> anyhow::Result<NewswireServer> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("ServerBuilder requires a store; call with_store"))?;
        let app = build_app(store);

        Ok(NewswireServer {
            addr: self.addr,
            app,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewswireServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
