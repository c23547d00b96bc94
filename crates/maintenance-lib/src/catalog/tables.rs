//! Built-in equipment tables
//!
//! Types without their own component library or schedule reuse the
//! furnace entries; types without failure history use the generic
//! whole-system pattern.

use std::collections::HashMap;

use super::{ComponentSpec, EquipmentProfile, EquipmentType, FailurePattern, UsageProfile};
use crate::models::MaintenanceSchedule;

const DEFAULT_LIFESPAN: u32 = 15;
const DEFAULT_ORIGINAL_COST: f64 = 3000.0;
const DEFAULT_MAINTENANCE_COST: f64 = 200.0;
const DEFAULT_BREAKDOWN_COST: f64 = 700.0;

const MODERATE_USAGE: UsageProfile = UsageProfile {
    heavy: None,
    moderate: 0.3,
    light: None,
};

pub(super) fn builtin_profiles() -> HashMap<EquipmentType, EquipmentProfile> {
    EquipmentType::ALL
        .into_iter()
        .map(|equipment| (equipment, profile_for(equipment)))
        .collect()
}

fn profile_for(equipment: EquipmentType) -> EquipmentProfile {
    use EquipmentType::*;

    let (expected_lifespan, original_cost, annual_maintenance_cost, breakdown_cost) =
        match equipment {
            Furnace => (18, 3500.0, 200.0, 800.0),
            Generator => (25, 5000.0, 400.0, 1200.0),
            WaterHeater => (10, 1200.0, 150.0, 600.0),
            AirConditioner => (15, 4000.0, 250.0, 900.0),
            Boiler => (
                20,
                DEFAULT_ORIGINAL_COST,
                DEFAULT_MAINTENANCE_COST,
                DEFAULT_BREAKDOWN_COST,
            ),
            Unknown => (
                DEFAULT_LIFESPAN,
                DEFAULT_ORIGINAL_COST,
                DEFAULT_MAINTENANCE_COST,
                DEFAULT_BREAKDOWN_COST,
            ),
        };

    let usage = match equipment {
        Furnace => UsageProfile {
            heavy: Some(0.6),
            moderate: 0.3,
            light: Some(0.1),
        },
        Generator => UsageProfile {
            heavy: Some(0.8),
            moderate: 0.4,
            light: Some(0.2),
        },
        WaterHeater => UsageProfile {
            heavy: Some(0.5),
            moderate: 0.3,
            light: Some(0.1),
        },
        _ => MODERATE_USAGE,
    };

    EquipmentProfile {
        expected_lifespan,
        failure_patterns: failure_patterns(equipment),
        components: components(equipment),
        base_schedule: base_schedule(equipment),
        usage,
        original_cost,
        annual_maintenance_cost,
        breakdown_cost,
    }
}

fn pattern(
    component: &'static str,
    average_lifespan: f64,
    failure_mode: &'static str,
    replacement_cost: &'static str,
    system_impact: &'static str,
) -> FailurePattern {
    FailurePattern {
        component,
        average_lifespan,
        failure_mode,
        replacement_cost,
        system_impact,
    }
}

fn failure_patterns(equipment: EquipmentType) -> Vec<FailurePattern> {
    match equipment {
        EquipmentType::Furnace => vec![
            pattern("Heat Exchanger", 15.0, "Cracking/corrosion", "$1200", "total"),
            pattern("Ignitor", 4.0, "Element burnout", "$65", "no_heat"),
            pattern("Gas Valve", 12.0, "Actuator failure", "$225", "no_heat"),
            pattern("Blower Motor", 10.0, "Bearing wear", "$300", "no_air"),
            pattern("Control Board", 8.0, "Electronic failure", "$375", "total"),
        ],
        EquipmentType::Generator => vec![
            pattern("Engine", 20.0, "Mechanical wear", "$3000", "total"),
            pattern("Alternator", 15.0, "Winding failure", "$1200", "no_power"),
            pattern("Control Panel", 10.0, "Electronic failure", "$450", "no_auto"),
            pattern("Battery", 3.0, "Capacity loss", "$150", "no_start"),
        ],
        EquipmentType::WaterHeater => vec![
            pattern("Gas Control", 8.0, "Thermostat failure", "$225", "no_heat"),
            pattern("Thermocouple", 5.0, "Corrosion/wear", "$40", "no_heat"),
            pattern("Anode Rod", 3.0, "Consumption", "$75", "tank_corrosion"),
        ],
        _ => vec![pattern(
            "Overall System",
            15.0,
            "General wear",
            "$2000",
            "varies",
        )],
    }
}

fn component(
    name: &'static str,
    expected_life: u32,
    replacement_cost: &'static str,
    system_impact: &'static str,
) -> ComponentSpec {
    ComponentSpec {
        name,
        expected_life,
        replacement_cost,
        system_impact,
    }
}

fn components(equipment: EquipmentType) -> Vec<ComponentSpec> {
    match equipment {
        EquipmentType::Generator => vec![
            component("Engine", 20, "$2000-4000", "critical"),
            component("Alternator", 15, "$800-1500", "critical"),
            component("Control Panel", 10, "$300-600", "high"),
            component("Battery", 3, "$100-200", "high"),
            component("Transfer Switch", 12, "$500-1200", "critical"),
        ],
        EquipmentType::WaterHeater => vec![
            component("Gas Control Valve", 8, "$150-300", "critical"),
            component("Thermocouple", 5, "$25-50", "high"),
            component("Anode Rod", 3, "$50-100", "medium"),
            component("Venting System", 15, "$200-500", "critical"),
        ],
        _ => vec![
            component("Heat Exchanger", 15, "$800-1500", "critical"),
            component("Ignitor", 4, "$45-85", "high"),
            component("Gas Valve", 12, "$150-300", "critical"),
            component("Blower Motor", 10, "$200-400", "high"),
            component("Control Board", 8, "$250-500", "critical"),
            component("Pressure Switch", 6, "$50-100", "high"),
        ],
    }
}

fn tasks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_schedule(equipment: EquipmentType) -> MaintenanceSchedule {
    match equipment {
        EquipmentType::Generator => MaintenanceSchedule {
            weekly: tasks(&["Exercise run (automatic)", "Visual inspection"]),
            monthly: tasks(&["Check oil level", "Battery test", "Transfer switch test"]),
            quarterly: tasks(&["Change oil/filter", "Air filter replacement"]),
            biannual: Vec::new(),
            annual: tasks(&["Spark plug replacement", "Complete system inspection"]),
        },
        EquipmentType::WaterHeater => MaintenanceSchedule {
            weekly: Vec::new(),
            monthly: tasks(&["Temperature/pressure relief valve test"]),
            quarterly: tasks(&["Anode rod inspection"]),
            biannual: Vec::new(),
            annual: tasks(&["Tank flush", "Venting inspection", "Gas control service"]),
        },
        _ => MaintenanceSchedule {
            weekly: Vec::new(),
            monthly: tasks(&["Replace air filter", "Visual inspection"]),
            quarterly: tasks(&["Check venting system", "Inspect electrical connections"]),
            biannual: Vec::new(),
            annual: tasks(&[
                "Professional tune-up",
                "Heat exchanger inspection",
                "Gas leak test",
            ]),
        },
    }
}
