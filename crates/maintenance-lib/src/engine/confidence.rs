//! Overall analysis confidence

use crate::models::{AgeEstimate, FailurePrediction, RiskAssessment};

const AGE_WEIGHT: f64 = 30.0;
const RISK_WEIGHT: f64 = 40.0;
const PREDICTION_WEIGHT: f64 = 30.0;

/// Normalized age confidence must exceed this to contribute
const AGE_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Returned when no factor contributes
const DEFAULT_CONFIDENCE: f64 = 30.0;

/// Average of the contributing factors, on a 0-100 scale
pub fn aggregate_confidence(
    age: &AgeEstimate,
    risk: &RiskAssessment,
    predictions: &[FailurePrediction],
) -> f64 {
    let mut contributions = Vec::with_capacity(3);

    if age.confidence as f64 / 100.0 > AGE_CONFIDENCE_THRESHOLD {
        contributions.push(AGE_WEIGHT);
    }

    let risk_weight = risk
        .factors()
        .iter()
        .map(|f| f.confidence.weight())
        .sum::<f64>()
        / 4.0;
    contributions.push(risk_weight * RISK_WEIGHT);

    if !predictions.is_empty() {
        let mean = predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64;
        contributions.push(mean * PREDICTION_WEIGHT);
    }

    if contributions.is_empty() {
        return DEFAULT_CONFIDENCE;
    }
    contributions.iter().sum::<f64>() / contributions.len() as f64
}
