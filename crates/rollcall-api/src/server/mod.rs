//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use rollcall_cache::{MemorySessionStore, RedisPool, RedisSessionStore};
use rollcall_common::{AppConfig, AppError, StorageBackend};
use rollcall_core::SnowflakeGenerator;
use rollcall_db::{
    create_pool, run_migrations, PgAccountRepository, PgAttendanceRepository, PgClassRepository,
    PgEnrollmentRepository,
};
use rollcall_service::{IdentityService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(), state.config());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let mut builder = ServiceContextBuilder::new()
        .snowflake_generator(snowflake_generator)
        .session_ttl(chrono::Duration::seconds(config.session.ttl_seconds));

    builder = match config.app.storage {
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&rollcall_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established, migrations applied");

            builder
                .account_repo(Arc::new(PgAccountRepository::new(pool.clone())))
                .class_repo(Arc::new(PgClassRepository::new(pool.clone())))
                .enrollment_repo(Arc::new(PgEnrollmentRepository::new(pool.clone())))
                .attendance_repo(Arc::new(PgAttendanceRepository::new(pool.clone())))
                .pool(pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data will not survive a restart");
            builder
                .account_repo(Arc::new(rollcall_db::MemoryAccountRepository::new()))
                .class_repo(Arc::new(rollcall_db::MemoryClassRepository::new()))
                .enrollment_repo(Arc::new(rollcall_db::MemoryEnrollmentRepository::new()))
                .attendance_repo(Arc::new(rollcall_db::MemoryAttendanceRepository::new()))
        }
    };

    builder = match &config.redis {
        Some(redis) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            redis_pool
                .health_check()
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis connection established");

            builder
                .session_store(Arc::new(RedisSessionStore::new(
                    redis_pool.clone(),
                    config.session.ttl_seconds,
                )))
                .redis_pool(redis_pool)
        }
        None => builder.session_store(Arc::new(MemorySessionStore::new())),
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = &config.admin {
        IdentityService::new(&service_context)
            .bootstrap_admin(admin)
            .await?;
    }

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
