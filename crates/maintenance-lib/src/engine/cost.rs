//! Repair-vs-replace cost analysis

use crate::catalog::EquipmentProfile;
use crate::models::{AgeEstimate, CostBenefitAnalysis, CostDecision};

const DEPRECIATION_RATE: f64 = 0.08;
const RESIDUAL_VALUE_FLOOR: f64 = 0.1;
const REPLACEMENT_INFLATION: f64 = 1.2;
const ANNUAL_ENERGY_COST: f64 = 1500.0;
const EFFICIENCY_LOSS_PER_YEAR: f64 = 0.02;
const MAX_EFFICIENCY_LOSS: f64 = 0.3;

/// Age assumed for depreciation and the decision rule when undetermined
const ASSUMED_AGE_YEARS: u32 = 5;

pub fn analyze_cost_benefit(age: &AgeEstimate, profile: &EquipmentProfile) -> CostBenefitAnalysis {
    let effective_age = age.age.unwrap_or(ASSUMED_AGE_YEARS);

    let current_value = depreciated_value(profile.original_cost, effective_age);
    let replacement_cost = profile.original_cost * REPLACEMENT_INFLATION;
    let maintenance_cost = profile.annual_maintenance_cost;
    let breakdown_risk = profile.breakdown_cost;
    // No efficiency loss is claimed without a known age
    let energy_savings = age.age.map(energy_savings).unwrap_or(0.0);

    let maintenance_roi = (energy_savings + breakdown_risk) / maintenance_cost;
    let replacement_roi = energy_savings / (replacement_cost - current_value);

    let recommendation = if maintenance_roi > replacement_roi && effective_age < 15 {
        CostDecision::Maintain
    } else if effective_age > 20 || maintenance_roi < 1.0 {
        CostDecision::Replace
    } else {
        CostDecision::Monitor
    };

    CostBenefitAnalysis {
        current_value,
        replacement_cost,
        maintenance_cost,
        energy_savings,
        breakdown_risk,
        maintenance_roi,
        replacement_roi,
        recommendation,
    }
}

fn depreciated_value(original_cost: f64, age: u32) -> f64 {
    let depreciated = original_cost * (1.0 - DEPRECIATION_RATE).powi(age as i32);
    depreciated.max(original_cost * RESIDUAL_VALUE_FLOOR)
}

fn energy_savings(age: u32) -> f64 {
    let efficiency_loss = (age as f64 * EFFICIENCY_LOSS_PER_YEAR).min(MAX_EFFICIENCY_LOSS);
    ANNUAL_ENERGY_COST * efficiency_loss
}
