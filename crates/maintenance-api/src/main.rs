//! Predictive maintenance service
//!
//! Serves `POST /api/predictive-maintenance` alongside health and
//! Prometheus endpoints.

use anyhow::{Context, Result};
use maintenance_api::{api, config::ServiceConfig};
use maintenance_lib::{
    health::{components, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    EquipmentCatalog, InMemoryRateLimitStore, MaintenanceEngine,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting maintenance-api");

    let config = ServiceConfig::load()?;
    info!(
        instance = %config.instance_name,
        port = config.api_port,
        seeded = config.rng_seed.is_some(),
        "Service configured"
    );

    let health_registry = HealthRegistry::new();
    health_registry.register(components::ENGINE).await;
    health_registry.register(components::RATE_LIMITER).await;

    // Refuse to start on a broken catalog rather than failing per request
    let catalog = match EquipmentCatalog::builtin() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!(error = %e, "Equipment catalog failed validation");
            health_registry
                .set_unhealthy(components::CATALOG, e.to_string())
                .await;
            return Err(e).context("Equipment catalog failed validation");
        }
    };
    health_registry.register(components::CATALOG).await;

    let mut engine = MaintenanceEngine::new(catalog.clone());
    if let Some(year) = config.reference_year {
        engine = engine.with_reference_year(year);
    }

    let metrics = ServiceMetrics::new();
    metrics.set_catalog_size(catalog.len());

    let logger = StructuredLogger::new(&config.instance_name);

    let rate_limiter = Arc::new(InMemoryRateLimitStore::new(
        config.rate_limit_max_requests,
        config.rate_limit_window(),
    ));

    let app_state = Arc::new(
        api::AppState::new(
            Arc::new(engine),
            rate_limiter,
            health_registry.clone(),
            metrics,
            logger.clone(),
        )
        .with_rng_seed(config.rng_seed),
    );

    health_registry.set_ready(true).await;

    let addr = format!("0.0.0.0:{}", config.api_port);
    logger.log_startup(SERVICE_VERSION, &addr, catalog.len());

    let purge_handle = tokio::spawn(api::purge_rate_limits(
        app_state.clone(),
        config.rate_limit_window(),
    ));
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::select! {
        result = api_handle => {
            purge_handle.abort();
            let reason = match result {
                Ok(Ok(())) => "server exited".to_string(),
                Ok(Err(e)) => format!("server error: {e}"),
                Err(e) => format!("server task failed: {e}"),
            };
            logger.log_shutdown(&reason);
            anyhow::bail!(reason);
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            purge_handle.abort();
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}
