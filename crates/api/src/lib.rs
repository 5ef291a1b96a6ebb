//! # TutorHub API
//!
//! HTTP surface of the TutorHub recurring session generator. Tutors and
//! center staff preview a weekly pattern before committing it as concrete
//! sessions.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn request bodies into generator calls
//! - **Middleware**: Error to HTTP response mapping
//! - **Config**: Environment driven server and generator settings
//!
//! Handlers only see the `SessionStore` trait, so the same router runs
//! against Postgres in production and an in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;
use tutorhub_core::{settings::GeneratorSettings, store::SessionStore};
use tutorhub_db::{DbPool, PgSessionStore};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tutorhub_api::{ApiState, build_router};
/// use tutorhub_core::settings::GeneratorSettings;
/// use tutorhub_db::mock::memory::InMemorySessionStore;
///
/// let state = Arc::new(ApiState {
///     sessions: Arc::new(InMemorySessionStore::new()),
///     settings: GeneratorSettings::default(),
/// });
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Where existing sessions are read from and new ones written to
    pub sessions: Arc<dyn SessionStore>,

    /// Generator tunables loaded from configuration
    pub settings: GeneratorSettings,
}

/// Builds the application router with all routes and the shared state attached.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Session generation endpoints
        .merge(routes::sessions::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, wires a `PgSessionStore` over `db_pool`,
/// applies CORS, request tracing and timeout layers, then serves until the
/// listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        sessions: Arc::new(PgSessionStore::new(db_pool)),
        settings: config.generator,
    });
    info!(
        "Generator settings: sample_limit={}, max_range_days={}",
        state.settings.sample_limit, state.settings.max_range_days
    );

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}
