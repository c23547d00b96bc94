//! Four-factor risk assessment
//!
//! Usage and maintenance factors are placeholders: no usage telemetry or
//! service history is ingested, so both always report low confidence.

use crate::catalog::EquipmentProfile;
use crate::models::{
    AgeEstimate, ConfidenceLevel, EnvironmentDescriptor, RiskAssessment, RiskBand, RiskFactor,
};

const ENVIRONMENT_CAP: f64 = 0.9;

pub fn assess_risk(
    age: &AgeEstimate,
    profile: &EquipmentProfile,
    environment: Option<&EnvironmentDescriptor>,
) -> RiskAssessment {
    let age_risk = assess_age_risk(age, profile);
    let environmental_risk = assess_environmental_risk(environment);
    let usage_risk = assess_usage_risk(profile);
    let maintenance_risk = assess_maintenance_risk();

    let mean = (age_risk.score
        + environmental_risk.score
        + usage_risk.score
        + maintenance_risk.score)
        / 4.0;

    RiskAssessment {
        age_risk,
        environmental_risk,
        usage_risk,
        maintenance_risk,
        overall_risk: RiskBand::from_score(mean),
    }
}

pub fn assess_age_risk(age: &AgeEstimate, profile: &EquipmentProfile) -> RiskFactor {
    let Some(age) = age.age else {
        return RiskFactor::new(0.3, "Unknown age", ConfidenceLevel::Low);
    };

    let life_ratio = age as f64 / profile.expected_lifespan as f64;
    if life_ratio > 0.9 {
        RiskFactor::new(0.9, "Near end of life", ConfidenceLevel::High)
    } else if life_ratio > 0.75 {
        RiskFactor::new(0.7, "Aging equipment", ConfidenceLevel::High)
    } else if life_ratio > 0.5 {
        RiskFactor::new(0.4, "Mid-life equipment", ConfidenceLevel::Medium)
    } else {
        RiskFactor::new(0.2, "Relatively new equipment", ConfidenceLevel::High)
    }
}

pub fn assess_environmental_risk(environment: Option<&EnvironmentDescriptor>) -> RiskFactor {
    let Some(env) = environment else {
        return RiskFactor::new(0.3, "Unknown environment", ConfidenceLevel::Low);
    };

    let weighted = [
        (env.extreme_temperatures, 0.2, "extreme temperatures"),
        (env.high_humidity, 0.15, "high humidity"),
        (env.salt_air, 0.25, "corrosive environment"),
        (env.dusty, 0.1, "dusty conditions"),
    ];

    let (score, factors) = weighted.iter().filter(|(present, _, _)| *present).fold(
        (0.0_f64, Vec::new()),
        |(score, mut factors), (_, weight, label)| {
            factors.push(*label);
            (score + weight, factors)
        },
    );

    let reason = if factors.is_empty() {
        "Standard environment".to_string()
    } else {
        format!("Environmental factors: {}", factors.join(", "))
    };

    RiskFactor::new(score.min(ENVIRONMENT_CAP), reason, ConfidenceLevel::Medium)
}

pub fn assess_usage_risk(profile: &EquipmentProfile) -> RiskFactor {
    RiskFactor::new(
        profile.usage.moderate,
        "Typical usage pattern assumed",
        ConfidenceLevel::Low,
    )
}

pub fn assess_maintenance_risk() -> RiskFactor {
    RiskFactor::new(0.4, "Maintenance history unknown", ConfidenceLevel::Low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentCatalog, EquipmentType};

    fn known_age(age: u32) -> AgeEstimate {
        AgeEstimate {
            age: Some(age),
            manufacturing_year: Some(2026 - age as i32),
            estimated: false,
            confidence: 85,
            source: None,
        }
    }

    #[test]
    fn test_age_risk_bands_for_furnace() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let furnace = catalog.profile(EquipmentType::Furnace);

        // Furnace expected lifespan is 18 years
        assert_eq!(assess_age_risk(&known_age(17), furnace).score, 0.9);
        assert_eq!(assess_age_risk(&known_age(14), furnace).score, 0.7);
        assert_eq!(assess_age_risk(&known_age(10), furnace).score, 0.4);
        assert_eq!(assess_age_risk(&known_age(9), furnace).score, 0.2);
        assert_eq!(assess_age_risk(&known_age(0), furnace).score, 0.2);
    }

    #[test]
    fn test_unknown_age_is_low_confidence_default() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let factor = assess_age_risk(&AgeEstimate::unknown(), catalog.profile(EquipmentType::Furnace));
        assert_eq!(factor.score, 0.3);
        assert_eq!(factor.reason, "Unknown age");
        assert_eq!(factor.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_environmental_risk_is_additive() {
        let env = EnvironmentDescriptor {
            extreme_temperatures: true,
            salt_air: true,
            ..Default::default()
        };
        let factor = assess_environmental_risk(Some(&env));
        assert!((factor.score - 0.45).abs() < 1e-9);
        assert!(factor.reason.contains("extreme temperatures"));
        assert!(factor.reason.contains("corrosive environment"));
        assert_eq!(factor.confidence, ConfidenceLevel::Medium);

        let all = EnvironmentDescriptor {
            extreme_temperatures: true,
            high_humidity: true,
            salt_air: true,
            dusty: true,
        };
        assert!(assess_environmental_risk(Some(&all)).score <= ENVIRONMENT_CAP);
    }

    #[test]
    fn test_environment_defaults() {
        let missing = assess_environmental_risk(None);
        assert_eq!(missing.score, 0.3);
        assert_eq!(missing.confidence, ConfidenceLevel::Low);

        let standard = assess_environmental_risk(Some(&EnvironmentDescriptor::default()));
        assert_eq!(standard.score, 0.0);
        assert_eq!(standard.reason, "Standard environment");
    }

    #[test]
    fn test_placeholder_factors_are_low_confidence() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let generator = assess_usage_risk(catalog.profile(EquipmentType::Generator));
        assert_eq!(generator.score, 0.4);
        assert_eq!(generator.confidence, ConfidenceLevel::Low);
        assert_eq!(assess_usage_risk(catalog.profile(EquipmentType::Unknown)).score, 0.3);
        assert_eq!(assess_maintenance_risk().confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_overall_risk_from_mean() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let furnace = catalog.profile(EquipmentType::Furnace);

        // 0.3 + 0.3 + 0.3 + 0.4 = 1.3 / 4 = 0.325
        let unknown = assess_risk(&AgeEstimate::unknown(), furnace, None);
        assert_eq!(unknown.overall_risk, RiskBand::Low);

        // 0.9 + 0.7 + 0.3 + 0.4 = 2.3 / 4 = 0.575
        let harsh = EnvironmentDescriptor {
            extreme_temperatures: true,
            high_humidity: true,
            salt_air: true,
            dusty: true,
        };
        let old = assess_risk(&known_age(20), furnace, Some(&harsh));
        assert_eq!(old.overall_risk, RiskBand::Medium);
        assert!((old.mean_score() - 0.575).abs() < 1e-9);
    }
}
