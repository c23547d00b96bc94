//! Metrics and structured logging for the analysis service
//!
//! Metrics live in the default Prometheus registry so `/metrics` can use
//! `prometheus::gather()` directly.

use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge_vec,
    Histogram, IntCounter, IntCounterVec, IntGaugeVec,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

use crate::models::{MaintenanceAnalysis, RiskBand};

/// Analysis latency buckets (seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    analysis_latency_seconds: Histogram,
    analyses_total: IntCounter,
    analysis_errors_total: IntCounter,
    rate_limited_total: IntCounter,
    overall_risk_total: IntCounterVec,
    catalog_info: IntGaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            analysis_latency_seconds: register_histogram!(
                "pm_analysis_latency_seconds",
                "Time spent running the scoring pipeline for one unit",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register analysis_latency_seconds"),

            analyses_total: register_int_counter!(
                "pm_analyses_total",
                "Total number of completed analyses"
            )
            .expect("Failed to register analyses_total"),

            analysis_errors_total: register_int_counter!(
                "pm_analysis_errors_total",
                "Total number of analyses that failed unexpectedly"
            )
            .expect("Failed to register analysis_errors_total"),

            rate_limited_total: register_int_counter!(
                "pm_rate_limited_total",
                "Total number of requests rejected by the rate limiter"
            )
            .expect("Failed to register rate_limited_total"),

            overall_risk_total: register_int_counter_vec!(
                "pm_overall_risk_total",
                "Completed analyses by overall risk band",
                &["band"]
            )
            .expect("Failed to register overall_risk_total"),

            catalog_info: register_int_gauge_vec!(
                "pm_catalog_info",
                "Number of equipment types in the loaded catalog",
                &["types"]
            )
            .expect("Failed to register catalog_info"),
        }
    }
}

/// Handle to the process-wide service metrics. Clones share state.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new)
    }

    /// Record one completed analysis
    pub fn observe_analysis(&self, duration_secs: f64, overall_risk: RiskBand) {
        let inner = self.inner();
        inner.analysis_latency_seconds.observe(duration_secs);
        inner.analyses_total.inc();
        inner
            .overall_risk_total
            .with_label_values(&[overall_risk.as_str()])
            .inc();
    }

    pub fn inc_analysis_errors(&self) {
        self.inner().analysis_errors_total.inc();
    }

    pub fn inc_rate_limited(&self) {
        self.inner().rate_limited_total.inc();
    }

    pub fn set_catalog_size(&self, types: usize) {
        let gauge = &self.inner().catalog_info;
        gauge.reset();
        gauge.with_label_values(&[&types.to_string()]).set(1);
    }

    pub fn analyses_total(&self) -> u64 {
        self.inner().analyses_total.get()
    }

    pub fn rate_limited_total(&self) -> u64 {
        self.inner().rate_limited_total.get()
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    pub fn log_startup(&self, version: &str, listen_addr: &str, catalog_types: usize) {
        info!(
            event = "service_started",
            instance = %self.instance,
            version = %version,
            listen_addr = %listen_addr,
            catalog_types = catalog_types,
            "Predictive maintenance service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Predictive maintenance service shutting down"
        );
    }

    pub fn log_analysis(&self, client: &str, analysis: &MaintenanceAnalysis, duration_secs: f64) {
        let critical = analysis
            .recommendations
            .iter()
            .filter(|r| r.priority.rank() == 4)
            .count();

        info!(
            event = "analysis_completed",
            instance = %self.instance,
            client = %client,
            equipment_type = %analysis.equipment.kind(),
            age = ?analysis.current_age.age,
            overall_risk = %analysis.risk_assessment.overall_risk,
            predictions = analysis.failure_predictions.len(),
            recommendations = analysis.recommendations.len(),
            critical_recommendations = critical,
            confidence = analysis.confidence,
            duration_secs = duration_secs,
            "Maintenance analysis completed"
        );
    }

    pub fn log_analysis_failure(&self, client: &str, reason: &str) {
        error!(
            event = "analysis_failed",
            instance = %self.instance,
            client = %client,
            reason = %reason,
            "Maintenance analysis failed"
        );
    }

    pub fn log_rejected(&self, client: &str, reason: &str) {
        warn!(
            event = "request_rejected",
            instance = %self.instance,
            client = %client,
            reason = %reason,
            "Rejected malformed analysis request"
        );
    }

    pub fn log_rate_limited(&self, client: &str, retry_after_secs: u64) {
        warn!(
            event = "rate_limited",
            instance = %self.instance,
            client = %client,
            retry_after_secs = retry_after_secs,
            "Client exceeded request rate limit"
        );
    }
}
