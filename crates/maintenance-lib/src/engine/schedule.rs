//! Maintenance schedule optimization

use crate::catalog::EquipmentProfile;
use crate::models::{AgeEstimate, ScheduleOptimization, UsagePattern};

/// Age above which extra inspection tasks are added
const ADVANCED_AGE_YEARS: u32 = 10;

/// Share of emergency breakdowns a denser schedule prevents
const BREAKDOWN_PREVENTION_RATE: f64 = 0.7;

/// Extra maintenance spend for the denser schedule
const MAINTENANCE_INFLATION: f64 = 0.2;

pub fn optimize_schedule(
    age: &AgeEstimate,
    profile: &EquipmentProfile,
    usage: Option<&UsagePattern>,
) -> ScheduleOptimization {
    let mut schedule = profile.base_schedule.clone();

    let advanced_age = age.age.is_some_and(|a| a > ADVANCED_AGE_YEARS);
    let heavy_usage = usage.is_some_and(UsagePattern::is_heavy);

    if advanced_age {
        schedule.annual.push("Detailed component inspection".to_string());
        schedule.biannual.push("Performance efficiency test".to_string());
    }
    if heavy_usage {
        schedule.quarterly.push("Extra performance check".to_string());
    }

    let frequency_increased = advanced_age || heavy_usage;

    ScheduleOptimization {
        schedule,
        reasoning: schedule_reasoning(age.age, advanced_age, heavy_usage),
        frequency_increased,
        cost_savings: estimate_savings(profile),
    }
}

fn schedule_reasoning(age: Option<u32>, advanced_age: bool, heavy_usage: bool) -> String {
    let mut reasoning = match age {
        Some(age) => format!("Based on equipment age ({} years)", age),
        None => "Based on equipment age (unknown years)".to_string(),
    };

    if advanced_age {
        reasoning.push_str(" and advanced age");
    }
    if heavy_usage {
        reasoning.push_str(" and heavy usage patterns");
    }

    if advanced_age || heavy_usage {
        reasoning.push_str(
            ", increased maintenance frequency is recommended to prevent failures and maximize efficiency.",
        );
    } else {
        reasoning.push_str(
            ", maintenance frequency has been optimized to prevent failures and maximize efficiency.",
        );
    }
    reasoning
}

fn estimate_savings(profile: &EquipmentProfile) -> f64 {
    profile.breakdown_cost * BREAKDOWN_PREVENTION_RATE
        - profile.annual_maintenance_cost * MAINTENANCE_INFLATION
}
