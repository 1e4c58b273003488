//! SnapAlbum backend server binary.
//!
//! Wires configuration, the Postgres pool, and the Stripe/Supabase adapters
//! into the Axum application and serves it.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use snapalbum::adapters::http::billing::{billing_router, BillingAppState};
use snapalbum::adapters::postgres::{PostgresAlbumRepository, PostgresProcessedSessionStore};
use snapalbum::adapters::stripe::{StripeGateway, StripeGatewayConfig};
use snapalbum::adapters::supabase::{SupabaseIdentityConfig, SupabaseIdentityProvider};
use snapalbum::config::AppConfig;
use snapalbum::domain::provisioning::StripeWebhookVerifier;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("fatal: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "starting snapalbum backend"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = BillingAppState {
        gateway: std::sync::Arc::new(StripeGateway::new(StripeGatewayConfig::new(
            config.payment.stripe_api_key.clone(),
            config.payment.album_price_cents,
            config.payment.currency.clone(),
        ))),
        identity: std::sync::Arc::new(SupabaseIdentityProvider::new(SupabaseIdentityConfig::new(
            config.supabase.project_url.clone(),
            config.supabase.service_role_key.clone(),
        ))),
        albums: std::sync::Arc::new(PostgresAlbumRepository::new(pool.clone())),
        ledger: std::sync::Arc::new(PostgresProcessedSessionStore::new(pool.clone())),
        verifier: StripeWebhookVerifier::new(config.payment.stripe_webhook_secret.clone()),
        reset_redirect_url: config.site.reset_password_url(),
        site_base_url: config.site.base_url.clone(),
    };

    let app = Router::new()
        .nest("/api", billing_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer from configured origins.
///
/// No configured origins means permissive CORS, which suits local
/// development; production deployments should list the site origin.
fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
