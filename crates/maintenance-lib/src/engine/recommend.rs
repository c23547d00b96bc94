//! Recommendation synthesis from the earlier pipeline stages

use crate::models::{
    AgeEstimate, CostBenefitAnalysis, CostDecision, FailurePrediction, Priority, Recommendation,
    RecommendationKind, RiskAssessment, RiskBand, ScheduleOptimization,
};

const END_OF_LIFE_AGE: u32 = 15;
const ACTIONABLE_PROBABILITY: f64 = 0.6;
const CRITICAL_PROBABILITY: f64 = 0.8;

/// Everything the synthesizer reads
pub struct SynthesisInput<'a> {
    pub age: &'a AgeEstimate,
    pub risk: &'a RiskAssessment,
    pub predictions: &'a [FailurePrediction],
    pub schedule: &'a ScheduleOptimization,
    pub cost: &'a CostBenefitAnalysis,
}

fn recommendation(
    kind: RecommendationKind,
    priority: Priority,
    message: impl Into<String>,
    action: impl Into<String>,
    timeframe: impl Into<String>,
) -> Recommendation {
    Recommendation {
        kind,
        priority,
        message: message.into(),
        action: action.into(),
        timeframe: timeframe.into(),
        cost: None,
    }
}

/// Build the prioritized recommendation list, most urgent first
pub fn synthesize(input: &SynthesisInput<'_>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if input.age.age.is_some_and(|age| age > END_OF_LIFE_AGE) {
        recommendations.push(recommendation(
            RecommendationKind::AgeConcern,
            Priority::High,
            "Equipment approaching end of typical lifespan - consider replacement planning",
            "Evaluate replacement options and budget planning",
            "Within 1-2 years",
        ));
    }

    if input.risk.overall_risk == RiskBand::High {
        recommendations.push(recommendation(
            RecommendationKind::HighRisk,
            Priority::Critical,
            "High failure risk detected - immediate attention required",
            "Schedule professional inspection within 30 days",
            "Immediate",
        ));
    }

    for prediction in input
        .predictions
        .iter()
        .filter(|p| p.probability > ACTIONABLE_PROBABILITY)
    {
        let priority = if prediction.probability > CRITICAL_PROBABILITY {
            Priority::Critical
        } else {
            Priority::High
        };
        recommendations.push(Recommendation {
            cost: prediction.cost.clone(),
            ..recommendation(
                RecommendationKind::FailurePrediction,
                priority,
                format!("{} failure predicted: {}", prediction.component, prediction.prediction),
                format!("Prepare for {} replacement", prediction.component.to_lowercase()),
                prediction.timeframe.label(),
            )
        });
    }

    if input.schedule.frequency_increased {
        recommendations.push(recommendation(
            RecommendationKind::MaintenanceOptimization,
            Priority::Medium,
            "Maintenance frequency should be increased based on equipment age/usage",
            "Implement enhanced maintenance schedule",
            "Next service cycle",
        ));
    }

    if input.cost.recommendation == CostDecision::Replace {
        recommendations.push(recommendation(
            RecommendationKind::ReplacementAdvisory,
            Priority::Medium,
            "Cost analysis suggests replacement may be more economical than continued maintenance",
            "Get quotes for new equipment installation",
            "Next 6-12 months",
        ));
    }

    if input.age.age.is_none() {
        recommendations.push(recommendation(
            RecommendationKind::InsufficientData,
            Priority::Low,
            "Equipment age could not be determined - predictions are low confidence",
            "Record the manufacturing date or serial number from the data plate",
            "Next service visit",
        ));
    }

    // sort_by is stable: ties keep insertion order
    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConfidenceLevel, FailureTimeframe, MaintenanceSchedule, RiskFactor,
    };

    fn risk(band: RiskBand) -> RiskAssessment {
        let factor = RiskFactor::new(0.3, "test", ConfidenceLevel::Low);
        RiskAssessment {
            age_risk: factor.clone(),
            environmental_risk: factor.clone(),
            usage_risk: factor.clone(),
            maintenance_risk: factor,
            overall_risk: band,
        }
    }

    fn schedule(frequency_increased: bool) -> ScheduleOptimization {
        ScheduleOptimization {
            schedule: MaintenanceSchedule::default(),
            reasoning: String::new(),
            frequency_increased,
            cost_savings: 0.0,
        }
    }

    fn cost(decision: CostDecision) -> CostBenefitAnalysis {
        CostBenefitAnalysis {
            current_value: 0.0,
            replacement_cost: 0.0,
            maintenance_cost: 0.0,
            energy_savings: 0.0,
            breakdown_risk: 0.0,
            maintenance_roi: 0.0,
            replacement_roi: 0.0,
            recommendation: decision,
        }
    }

    fn prediction(component: &str, probability: f64) -> FailurePrediction {
        FailurePrediction {
            component: component.to_string(),
            prediction: "Bearing wear".to_string(),
            timeframe: FailureTimeframe::from_probability(probability),
            probability,
            cost: Some("$300".to_string()),
            impact: Some("no_air".to_string()),
            confidence: probability * 0.8,
        }
    }

    fn aged(age: Option<u32>) -> AgeEstimate {
        AgeEstimate {
            age,
            ..AgeEstimate::unknown()
        }
    }

    #[test]
    fn test_all_triggers_sorted_by_priority() {
        let age = aged(Some(17));
        let risk = risk(RiskBand::High);
        let predictions = vec![prediction("Blower Motor", 0.85), prediction("Gas Valve", 0.65)];
        let schedule = schedule(true);
        let cost = cost(CostDecision::Replace);

        let recs = synthesize(&SynthesisInput {
            age: &age,
            risk: &risk,
            predictions: &predictions,
            schedule: &schedule,
            cost: &cost,
        });

        let kinds: Vec<_> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::HighRisk,
                RecommendationKind::FailurePrediction,
                RecommendationKind::AgeConcern,
                RecommendationKind::FailurePrediction,
                RecommendationKind::MaintenanceOptimization,
                RecommendationKind::ReplacementAdvisory,
            ]
        );
        for pair in recs.windows(2) {
            assert!(pair[0].priority.rank() >= pair[1].priority.rank());
        }

        let blower = &recs[1];
        assert_eq!(blower.message, "Blower Motor failure predicted: Bearing wear");
        assert_eq!(blower.action, "Prepare for blower motor replacement");
        assert_eq!(blower.timeframe, "Within 1 year");
        assert_eq!(blower.cost.as_deref(), Some("$300"));
    }

    #[test]
    fn test_low_probability_predictions_are_ignored() {
        let age = aged(Some(5));
        let risk = risk(RiskBand::Low);
        let predictions = vec![prediction("Ignitor", 0.55)];
        let schedule = schedule(false);
        let cost = cost(CostDecision::Maintain);

        let recs = synthesize(&SynthesisInput {
            age: &age,
            risk: &risk,
            predictions: &predictions,
            schedule: &schedule,
            cost: &cost,
        });
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unknown_age_yields_insufficient_data() {
        let age = AgeEstimate::unknown();
        let risk = risk(RiskBand::Low);
        let schedule = schedule(false);
        let cost = cost(CostDecision::Maintain);

        let recs = synthesize(&SynthesisInput {
            age: &age,
            risk: &risk,
            predictions: &[],
            schedule: &schedule,
            cost: &cost,
        });
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::InsufficientData);
        assert_eq!(recs[0].priority, Priority::Low);
    }
}
