//! # Reservation API
//!
//! The API crate provides the web server for the reservation service.
//! It exposes RESTful endpoints for opening schedule slots and for
//! requesting, accepting and rejecting reservations against them.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Open a unit of work, call the engine, commit
//! - **Middleware**: Admin authentication and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers never touch SQL. They go through the storage ports in
//! `reservation_core::store`, backed by PostgreSQL or by process memory.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use reservation_core::store::Storage;
use reservation_db::{create_pool, memory::MemoryStorage, postgres::PgStorage, schema};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ApiConfig, StorageBackend};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use reservation_api::{ApiState, router};
/// use reservation_db::memory::MemoryStorage;
///
/// let state = Arc::new(ApiState {
///     storage: Arc::new(MemoryStorage::new()),
///     admin_password_hash: None,
/// });
/// let app = router(state);
/// ```
pub struct ApiState {
    /// Opens one unit of work per request
    pub storage: Arc<dyn Storage>,
    /// Argon2 hash of the admin password; `None` leaves admin routes open
    pub admin_password_hash: Option<String>,
}

/// Builds the application router with every endpoint attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule slot endpoints
        .merge(routes::schedule::routes())
        // Reservation endpoints
        .merge(routes::reservation::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Installs the global fmt subscriber at `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Connects the configured storage backend.
///
/// For PostgreSQL the schema is created if it does not exist yet.
pub async fn build_storage(config: &ApiConfig) -> Result<Arc<dyn Storage>> {
    match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections)
                .await
                .wrap_err("Failed to connect to PostgreSQL")?;
            schema::initialize_database(&pool).await?;
            info!(max_connections, "Using PostgreSQL storage");
            Ok(Arc::new(PgStorage::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data will be lost on shutdown");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

/// Starts the API server with the provided configuration and storage
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use reservation_api::{build_storage, config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let storage = build_storage(&config).await?;
/// start_server(config, storage).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, storage: Arc<dyn Storage>) -> Result<()> {
    let admin_password_hash = match &config.admin_password {
        Some(password) => Some(middleware::auth::hash_password(password)?),
        None => {
            warn!("ADMIN_PASSWORD is not set, admin endpoints are open to everyone");
            None
        }
    };

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        storage,
        admin_password_hash,
    });

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
