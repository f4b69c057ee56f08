//! Backend entry-point: loads settings, prepares adapters, and starts the
//! REST server.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::domain::ports::ImageUploader;
use blog_backend::inbound::http::health::HealthState;
use blog_backend::inbound::http::session_config::{BuildMode, session_settings};
use blog_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use blog_backend::outbound::uploads::HttpImageUploader;
use blog_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(database_url) = settings.database_url.as_deref() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations applied");

        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_pool_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("BLOG_DATABASE_URL unset; serving fixture data");
    }

    if let Some(upload_url) = settings.upload_url.as_deref() {
        let endpoint = upload_url.parse().map_err(|e| {
            std::io::Error::other(format!("invalid upload url '{upload_url}': {e}"))
        })?;
        let uploader = HttpImageUploader::new(
            endpoint,
            settings.upload_preset.clone(),
            settings.upload_timeout(),
        )
        .map_err(std::io::Error::other)?;
        config = config.with_image_uploader(Arc::new(uploader) as Arc<dyn ImageUploader>);
    }

    #[cfg(feature = "metrics")]
    {
        let prometheus = PrometheusMetricsBuilder::new("blog")
            .endpoint("/metrics")
            .build()
            .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))?;
        config = config.with_metrics(Some(prometheus));
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
