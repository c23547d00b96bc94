//! Probabilistic component failure prediction
//!
//! Base probability is the age-to-lifespan ratio, scaled by usage and
//! perturbed by a bounded random term drawn from the caller's generator.
//! One draw is taken per pattern regardless of filtering so a fixed seed
//! yields comparable results across ages.

use rand::Rng;

use crate::catalog::EquipmentProfile;
use crate::models::{AgeEstimate, FailurePrediction, FailureTimeframe, UsagePattern};

/// Ceiling on the age ratio before usage scaling
const BASE_PROBABILITY_CAP: f64 = 0.9;

/// Ceiling on the final probability
const PROBABILITY_CAP: f64 = 0.95;

/// Half-width of the uniform perturbation
const PERTURBATION: f64 = 0.1;

/// Predictions at or below this probability are dropped
const REPORT_THRESHOLD: f64 = 0.3;

/// Prediction confidence relative to probability
const CONFIDENCE_FACTOR: f64 = 0.8;

pub fn predict_failures<R: Rng>(
    age: &AgeEstimate,
    profile: &EquipmentProfile,
    usage: Option<&UsagePattern>,
    rng: &mut R,
) -> Vec<FailurePrediction> {
    let Some(age) = age.age else {
        return vec![insufficient_data()];
    };

    let multiplier = usage.map(|u| u.intensity.failure_multiplier()).unwrap_or(1.0);

    let mut predictions: Vec<FailurePrediction> = profile
        .failure_patterns
        .iter()
        .filter_map(|pattern| {
            let base = (age as f64 / pattern.average_lifespan).min(BASE_PROBABILITY_CAP) * multiplier;
            let variation = rng.gen_range(-PERTURBATION..=PERTURBATION);
            let probability = (base + variation).clamp(0.0, PROBABILITY_CAP);

            (probability > REPORT_THRESHOLD).then(|| FailurePrediction {
                component: pattern.component.to_string(),
                prediction: pattern.failure_mode.to_string(),
                timeframe: FailureTimeframe::from_probability(probability),
                probability,
                cost: Some(pattern.replacement_cost.to_string()),
                impact: Some(pattern.system_impact.to_string()),
                confidence: probability * CONFIDENCE_FACTOR,
            })
        })
        .collect();

    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    predictions
}

/// Degraded-mode entry when age is undetermined
fn insufficient_data() -> FailurePrediction {
    FailurePrediction {
        component: "Overall system".to_string(),
        prediction: "Insufficient data for accurate prediction".to_string(),
        timeframe: FailureTimeframe::Unknown,
        probability: 0.0,
        cost: None,
        impact: None,
        confidence: 0.1,
    }
}
