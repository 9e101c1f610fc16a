use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_service::config::{Config, LogFormat, StorageBackend};
use catalog_service::handlers;
use catalog_service::repository::{
    CatalogRepository, InMemoryCatalogRepository, PgCatalogRepository,
};
use catalog_service::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,catalog_service=debug,actix_web=info,sqlx=warn".into());
    match config.log.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!(
        env = %config.app.env,
        storage = ?config.storage,
        "Starting catalog-service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let repo: Arc<dyn CatalogRepository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = catalog_service::db::create_pool(&config.database)
                .await
                .context("Failed to create database pool")?;
            let repo = PgCatalogRepository::new(pool);
            repo.migrate()
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");
            Arc::new(repo)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(InMemoryCatalogRepository::new())
        }
    };

    let state = web::Data::new(AppState::new(repo));
    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let allowed_origins = config.cors.allowed_origins.clone();
    let api_prefix = config.app.api_prefix.clone();

    tracing::info!("Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let prefix = api_prefix.clone();
        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| handlers::configure_scope(cfg, &prefix))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
