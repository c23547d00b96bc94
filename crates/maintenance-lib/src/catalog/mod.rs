//! Static equipment catalog
//!
//! Maps every [`EquipmentType`] to an [`EquipmentProfile`] holding the
//! lifespan, failure-pattern, component, schedule and cost tables used by
//! the scoring engine. The catalog is validated once at construction and
//! is read-only afterwards.

mod tables;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::MaintenanceSchedule;

/// Closed set of equipment kinds the tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Furnace,
    Generator,
    WaterHeater,
    AirConditioner,
    Boiler,
    Unknown,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 6] = [
        EquipmentType::Furnace,
        EquipmentType::Generator,
        EquipmentType::WaterHeater,
        EquipmentType::AirConditioner,
        EquipmentType::Boiler,
        EquipmentType::Unknown,
    ];

    /// Case-insensitive parse; unrecognized strings map to `Unknown`
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "furnace" => EquipmentType::Furnace,
            "generator" => EquipmentType::Generator,
            "water_heater" | "waterheater" => EquipmentType::WaterHeater,
            "air_conditioner" | "airconditioner" | "ac" => EquipmentType::AirConditioner,
            "boiler" => EquipmentType::Boiler,
            _ => EquipmentType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Furnace => "furnace",
            EquipmentType::Generator => "generator",
            EquipmentType::WaterHeater => "water_heater",
            EquipmentType::AirConditioner => "air_conditioner",
            EquipmentType::Boiler => "boiler",
            EquipmentType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Historical failure behaviour of one component
#[derive(Debug, Clone, PartialEq)]
pub struct FailurePattern {
    pub component: &'static str,
    /// Years
    pub average_lifespan: f64,
    pub failure_mode: &'static str,
    pub replacement_cost: &'static str,
    pub system_impact: &'static str,
}

/// Replaceable component tracked for lifespan
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: &'static str,
    /// Years
    pub expected_life: u32,
    pub replacement_cost: &'static str,
    pub system_impact: &'static str,
}

/// Usage-risk scores by intensity
///
/// Only `moderate` feeds the usage factor until usage telemetry is ingested.
/// The intensity-specific scores are carried for the types that publish them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageProfile {
    pub heavy: Option<f64>,
    pub moderate: f64,
    pub light: Option<f64>,
}

/// Everything the engine needs to know about one equipment type
#[derive(Debug, Clone)]
pub struct EquipmentProfile {
    /// Years
    pub expected_lifespan: u32,
    pub failure_patterns: Vec<FailurePattern>,
    pub components: Vec<ComponentSpec>,
    pub base_schedule: MaintenanceSchedule,
    pub usage: UsageProfile,
    pub original_cost: f64,
    pub annual_maintenance_cost: f64,
    pub breakdown_cost: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("no profile registered for equipment type '{0}'")]
    MissingProfile(EquipmentType),

    #[error("profile for '{equipment}' has an empty {table} table")]
    EmptyTable {
        equipment: EquipmentType,
        table: &'static str,
    },

    #[error("profile for '{equipment}' has non-positive {field}")]
    NonPositive {
        equipment: EquipmentType,
        field: String,
    },
}

/// Validated, immutable lookup from equipment type to profile
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    profiles: HashMap<EquipmentType, EquipmentProfile>,
}

impl EquipmentCatalog {
    /// Build and validate the built-in tables
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_profiles(tables::builtin_profiles())
    }

    /// Validate a custom set of profiles
    pub fn from_profiles(
        profiles: HashMap<EquipmentType, EquipmentProfile>,
    ) -> Result<Self, CatalogError> {
        for equipment in EquipmentType::ALL {
            let profile = profiles
                .get(&equipment)
                .ok_or(CatalogError::MissingProfile(equipment))?;
            validate_profile(equipment, profile)?;
        }
        Ok(Self { profiles })
    }

    /// Profile for a type. Every variant is guaranteed present after validation.
    pub fn profile(&self, equipment: EquipmentType) -> &EquipmentProfile {
        &self.profiles[&equipment]
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn validate_profile(equipment: EquipmentType, profile: &EquipmentProfile) -> Result<(), CatalogError> {
    if profile.failure_patterns.is_empty() {
        return Err(CatalogError::EmptyTable {
            equipment,
            table: "failure pattern",
        });
    }
    if profile.components.is_empty() {
        return Err(CatalogError::EmptyTable {
            equipment,
            table: "component",
        });
    }

    let non_positive = |field: &str| CatalogError::NonPositive {
        equipment,
        field: field.to_string(),
    };

    if profile.expected_lifespan == 0 {
        return Err(non_positive("expected lifespan"));
    }
    if profile.original_cost <= 0.0 {
        return Err(non_positive("original cost"));
    }
    if profile.annual_maintenance_cost <= 0.0 {
        return Err(non_positive("annual maintenance cost"));
    }
    if profile.breakdown_cost <= 0.0 {
        return Err(non_positive("breakdown cost"));
    }
    if let Some(pattern) = profile
        .failure_patterns
        .iter()
        .find(|p| p.average_lifespan <= 0.0)
    {
        return Err(non_positive(&format!("lifespan for {}", pattern.component)));
    }
    if let Some(component) = profile.components.iter().find(|c| c.expected_life == 0) {
        return Err(non_positive(&format!("expected life for {}", component.name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_covers_every_type() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), EquipmentType::ALL.len());
        for equipment in EquipmentType::ALL {
            assert!(!catalog.profile(equipment).components.is_empty());
        }
    }

    #[test]
    fn test_intensity_scores_only_where_published() {
        let catalog = EquipmentCatalog::builtin().unwrap();

        let generator = catalog.profile(EquipmentType::Generator).usage;
        assert_eq!(generator.heavy, Some(0.8));
        assert_eq!(generator.moderate, 0.4);
        assert_eq!(generator.light, Some(0.2));

        let boiler = catalog.profile(EquipmentType::Boiler).usage;
        assert_eq!(boiler.heavy, None);
        assert_eq!(boiler.moderate, 0.3);
        assert_eq!(boiler.light, None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(EquipmentType::parse("Furnace"), EquipmentType::Furnace);
        assert_eq!(EquipmentType::parse("WATER_HEATER"), EquipmentType::WaterHeater);
        assert_eq!(EquipmentType::parse("water heater"), EquipmentType::WaterHeater);
        assert_eq!(EquipmentType::parse("Air-Conditioner"), EquipmentType::AirConditioner);
        assert_eq!(EquipmentType::parse("heat pump"), EquipmentType::Unknown);
    }

    #[test]
    fn test_missing_profile_fails_validation() {
        let mut profiles = tables::builtin_profiles();
        profiles.remove(&EquipmentType::Boiler);
        let err = EquipmentCatalog::from_profiles(profiles).unwrap_err();
        assert_eq!(err, CatalogError::MissingProfile(EquipmentType::Boiler));
    }

    #[test]
    fn test_empty_component_table_fails_validation() {
        let mut profiles = tables::builtin_profiles();
        profiles
            .get_mut(&EquipmentType::Generator)
            .unwrap()
            .components
            .clear();
        let err = EquipmentCatalog::from_profiles(profiles).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyTable {
                equipment: EquipmentType::Generator,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_maintenance_cost_fails_validation() {
        let mut profiles = tables::builtin_profiles();
        profiles
            .get_mut(&EquipmentType::Furnace)
            .unwrap()
            .annual_maintenance_cost = 0.0;
        let err = EquipmentCatalog::from_profiles(profiles).unwrap_err();
        assert!(err.to_string().contains("annual maintenance cost"));
    }

    #[test]
    fn test_unlisted_types_fall_back_to_generic_failure_pattern() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let patterns = &catalog.profile(EquipmentType::Boiler).failure_patterns;
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].component, "Overall System");
        assert_eq!(catalog.profile(EquipmentType::Boiler).expected_lifespan, 20);
    }
}
