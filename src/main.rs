mod models;
mod handlers;
mod store;
mod ledger;
mod charts;
mod middleware;
mod config;
mod errors;

use axum::{
    routing::{get, post},
    Router,
    middleware::from_fn,
};
use tower_http::services::ServeDir;
use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use std::sync::Arc;
use crate::{
    config::{Config, StoreBackend},
    ledger::Ledger,
    store::{DocumentStore, MemoryStore, RedisStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load()?;

    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Redis => {
            let client = redis::Client::open(config.store.redis_url.as_str())?;
            Arc::new(RedisStore::new(Arc::new(client)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let ledger = Ledger::new(store, config.auth.bcrypt_cost);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app(ledger, config).into_make_service()).await?;
    Ok(())
}

fn app(ledger: Ledger, config: Config) -> Router {
    // Session store setup
    let session_layer = SessionManagerLayer::new(SessionMemoryStore::default())
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    Router::new()
        // Auth routes
        .route("/", get(handlers::serve_login_page))
        .route("/login", post(handlers::handle_login))
        .route("/register", post(handlers::handle_register))
        .route("/logout", get(handlers::handle_logout))

        // Ledger routes
        .route("/dashboard", get(handlers::serve_dashboard))
        .route("/api/summary", get(handlers::serve_summary))
        .route("/expenses/new", get(handlers::serve_expense_page))
        .route("/expenses", post(handlers::handle_add_expense))
        .route("/budget", get(handlers::serve_budget_page))
        .route("/budget/salary", post(handlers::handle_save_salary))
        .route("/budget/category", post(handlers::handle_add_category))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)

        // Add state
        .with_state((ledger, config))
}
