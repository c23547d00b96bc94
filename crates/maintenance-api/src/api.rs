//! HTTP API: the analysis endpoint plus health checks and Prometheus metrics

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use maintenance_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    AnalysisRequest, AnalysisResponse, Analyzer, RateLimitStore,
};
use prometheus::{Encoder, TextEncoder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub const ANALYSIS_PATH: &str = "/api/predictive-maintenance";

/// Tracked clients above which the rate limiter reports degraded
const TRACKED_CLIENTS_WARN: usize = 100_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn Analyzer>,
    pub rate_limiter: Arc<dyn RateLimitStore>,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
    /// Fixed per-request seed; fresh entropy when `None`
    pub rng_seed: Option<u64>,
}

impl AppState {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        rate_limiter: Arc<dyn RateLimitStore>,
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            analyzer,
            rate_limiter,
            health_registry,
            metrics,
            logger,
            rng_seed: None,
        }
    }

    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    fn request_rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    #[error("Analysis failed: {0}")]
    Internal(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::MethodNotAllowed => {
                (status, Json(json!({ "error": self.to_string() }))).into_response()
            }
            ApiError::RateLimited { retry_after_secs } => {
                let body = AnalysisResponse {
                    retry_after: Some(retry_after_secs),
                    ..AnalysisResponse::failure(self.to_string())
                };
                (
                    status,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    Json(body),
                )
                    .into_response()
            }
            _ => (status, Json(AnalysisResponse::failure(self.to_string()))).into_response(),
        }
    }
}

/// Rate-limit key: `client-ip`, else the first `x-forwarded-for` hop
pub fn client_key(headers: &HeaderMap) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header_str("client-ip")
        .or_else(|| {
            header_str("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
        })
        .unwrap_or("unknown")
        .to_string()
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "analysis panicked".to_string())
}

/// Run one analysis
async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let client = client_key(&headers);

    let decision = state
        .rate_limiter
        .check(&client, chrono::Utc::now().timestamp_millis())
        .await;
    if !decision.allowed {
        let retry_after_secs = decision.retry_after_secs.unwrap_or(1);
        state.metrics.inc_rate_limited();
        state.logger.log_rate_limited(&client, retry_after_secs);
        return Err(ApiError::RateLimited { retry_after_secs });
    }

    let request: AnalysisRequest = serde_json::from_slice(&body).map_err(|e| {
        state.logger.log_rejected(&client, &e.to_string());
        ApiError::BadRequest(e.to_string())
    })?;

    let analyzer = state.analyzer.clone();
    let mut rng = state.request_rng();
    let started = Instant::now();

    let outcome =
        tokio::task::spawn_blocking(move || analyzer.analyze(&request, &mut rng)).await;
    let duration_secs = started.elapsed().as_secs_f64();

    match outcome {
        Ok(analysis) => {
            state
                .metrics
                .observe_analysis(duration_secs, analysis.risk_assessment.overall_risk);
            state.logger.log_analysis(&client, &analysis, duration_secs);
            Ok(Json(AnalysisResponse::ok(analysis)))
        }
        Err(err) => {
            let message = panic_message(err);
            state.metrics.inc_analysis_errors();
            state.logger.log_analysis_failure(&client, &message);
            Err(ApiError::Internal(message))
        }
    }
}

/// CORS preflight without the `Origin` headers the layer answers itself
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Health check response - returns 200 if operational, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        buffer,
    )
        .into_response()
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            ANALYSIS_PATH,
            post(analyze)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(cors_layer())
        .with_state(state)
}

/// Periodically drop idle rate-limit entries so the store stays bounded
pub async fn purge_rate_limits(state: Arc<AppState>, interval: std::time::Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let removed = state
            .rate_limiter
            .purge_expired(chrono::Utc::now().timestamp_millis())
            .await;
        let tracked = state.rate_limiter.tracked_clients().await;
        tracing::debug!(removed, tracked, "Purged idle rate-limit entries");

        if tracked > TRACKED_CLIENTS_WARN {
            state
                .health_registry
                .set_degraded(
                    components::RATE_LIMITER,
                    format!("{} clients tracked inside the window", tracked),
                )
                .await;
        } else {
            state
                .health_registry
                .set_healthy(components::RATE_LIMITER)
                .await;
        }
    }
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
