//! Risk and lifecycle scoring pipeline
//!
//! Stages run in a fixed order, each a pure function of the request and the
//! outputs of earlier stages. The only non-determinism is the failure
//! perturbation, drawn from the generator passed to [`MaintenanceEngine::analyze`].

mod age;
mod confidence;
mod cost;
mod failure;
mod lifespan;
mod recommend;
mod risk;
mod schedule;

pub use age::{decode_serial_year, resolve_age};
pub use confidence::aggregate_confidence;
pub use cost::analyze_cost_benefit;
pub use failure::predict_failures;
pub use lifespan::assess_lifespans;
pub use recommend::{synthesize, SynthesisInput};
pub use risk::{
    assess_age_risk, assess_environmental_risk, assess_maintenance_risk, assess_risk,
    assess_usage_risk,
};
pub use schedule::optimize_schedule;

use std::sync::Arc;

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::catalog::EquipmentCatalog;
use crate::models::{AnalysisRequest, MaintenanceAnalysis};

/// Trait for analysis implementations served over HTTP
pub trait Analyzer: Send + Sync {
    /// Run the full pipeline for one request
    fn analyze(&self, request: &AnalysisRequest, rng: &mut StdRng) -> MaintenanceAnalysis;

    /// Number of equipment types the analyzer has tables for
    fn catalog_size(&self) -> usize;
}

/// Runs the full analysis pipeline against a validated catalog
#[derive(Debug, Clone)]
pub struct MaintenanceEngine {
    catalog: Arc<EquipmentCatalog>,
    reference_year: Option<i32>,
}

impl MaintenanceEngine {
    pub fn new(catalog: Arc<EquipmentCatalog>) -> Self {
        Self {
            catalog,
            reference_year: None,
        }
    }

    /// Pin the year ages are computed against instead of the current UTC year
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    /// Analyze one unit. Missing data degrades confidence, never fails.
    pub fn analyze<R: Rng>(&self, request: &AnalysisRequest, rng: &mut R) -> MaintenanceAnalysis {
        let equipment = &request.equipment_data;
        let kind = equipment.kind();
        let profile = self.catalog.profile(kind);
        let usage = request.usage_patterns.as_ref();

        let current_age = resolve_age(equipment, self.reference_year());
        let risk_assessment = assess_risk(&current_age, profile, request.environment_data.as_ref());
        let failure_predictions = predict_failures(&current_age, profile, usage, rng);
        let maintenance_schedule = optimize_schedule(&current_age, profile, usage);
        let component_lifespan = assess_lifespans(&current_age, profile);
        let cost_analysis = analyze_cost_benefit(&current_age, profile);

        let recommendations = synthesize(&SynthesisInput {
            age: &current_age,
            risk: &risk_assessment,
            predictions: &failure_predictions,
            schedule: &maintenance_schedule,
            cost: &cost_analysis,
        });
        let confidence = aggregate_confidence(&current_age, &risk_assessment, &failure_predictions);

        debug!(
            equipment_type = %kind,
            age = ?current_age.age,
            overall_risk = %risk_assessment.overall_risk,
            predictions = failure_predictions.len(),
            recommendations = recommendations.len(),
            "Analysis pipeline finished"
        );

        MaintenanceAnalysis {
            equipment: equipment.clone(),
            mode: request.mode,
            current_age,
            risk_assessment,
            failure_predictions,
            maintenance_schedule,
            component_lifespan,
            cost_analysis,
            recommendations,
            confidence,
        }
    }
}

impl Analyzer for MaintenanceEngine {
    fn analyze(&self, request: &AnalysisRequest, rng: &mut StdRng) -> MaintenanceAnalysis {
        MaintenanceEngine::analyze(self, request, rng)
    }

    fn catalog_size(&self) -> usize {
        self.catalog.len()
    }
}
