//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::application::{SeedAccountInput, SeedAccountUseCase};
use anyhow::Context;
use auth::{AuthConfig, AuthGate, AuthSessionRepository, PgAuthRepository, UserRole};
use axum::{
    Router, http,
    http::{Method, header},
    response::{IntoResponse, Response},
};
use cms::PgCmsRepository;
use kernel::error::app_error::AppError;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{SeedAdmin, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,cms=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env()?;
    let auth_config = Arc::new(AuthConfig::from_env()?);
    tracing::info!(
        bind_addr = %server.bind_addr,
        max_connections = server.max_connections,
        origins = ?server.frontend_origins,
        auth = ?auth_config,
        "Configuration loaded"
    );

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(server.max_connections)
        .connect(&server.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let accounts = Arc::new(PgAuthRepository::new(pool.clone()));
    let content = Arc::new(PgCmsRepository::new(pool.clone()));

    // Startup cleanup: errors here should not prevent server startup
    match accounts.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    if let Some(seed) = &server.seed_admin {
        seed_startup_data(&accounts, &auth_config, &content, seed).await?;
    }

    let cors = cors_layer(&server.frontend_origins);

    // Build router
    let admin = auth::admin_auth_router(accounts.clone(), auth_config.clone()).merge(
        AuthGate::admin(accounts.clone(), auth_config.clone())
            .protect(cms::admin_router(content.clone())),
    );

    let app = Router::new()
        .nest("/api/auth", auth::auth_router(accounts.clone(), auth_config.clone()))
        .nest("/api/admin", admin)
        .nest("/api", cms::public_router(content))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(cors),
        );

    // Start server
    tracing::info!("Listening on {}", server.bind_addr);

    let listener = TcpListener::bind(server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Admin account plus default categories and tags. Idempotent.
async fn seed_startup_data(
    accounts: &Arc<PgAuthRepository>,
    auth_config: &Arc<AuthConfig>,
    content: &PgCmsRepository,
    seed: &SeedAdmin,
) -> anyhow::Result<()> {
    let created = SeedAccountUseCase::new(accounts.clone(), auth_config.clone())
        .execute(SeedAccountInput {
            email: seed.email.clone(),
            password: seed.password.clone(),
            name: seed.name.clone(),
            role: UserRole::Admin,
        })
        .await
        .context("seeding admin account failed")?;

    if created {
        tracing::info!(email = %seed.email, "Admin account seeded");
    }

    let written = cms::seed_defaults(content)
        .await
        .context("seeding default categories and tags failed")?;
    tracing::info!(rows = written, "Default categories and tags seeded");

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// A panicking handler still answers with the usual JSON error body
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %message, "Handler panicked");

    AppError::internal("Internal Server Error").into_response()
}
