//! Predictive maintenance scoring for HVAC equipment
//!
//! This crate provides:
//! - The equipment catalog (lifespans, failure patterns, components, costs)
//! - The risk and lifecycle scoring pipeline
//! - Per-client rate limiting for the service boundary
//! - Health checks and observability

pub mod catalog;
pub mod engine;
pub mod health;
pub mod models;
pub mod observability;
pub mod rate_limit;

pub use catalog::{CatalogError, EquipmentCatalog, EquipmentType};
pub use engine::{Analyzer, MaintenanceEngine};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use rate_limit::{InMemoryRateLimitStore, RateDecision, RateLimitStore};
