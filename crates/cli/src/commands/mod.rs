//! Subcommand implementations

pub mod analyze;
pub mod components;
pub mod health;
pub mod schedule;

use anyhow::{Context, Result};
use maintenance_lib::{AgeEstimate, EquipmentCatalog, EquipmentType};

use crate::output::print_warning;

fn load_catalog() -> Result<EquipmentCatalog> {
    EquipmentCatalog::builtin().context("Built-in equipment catalog failed validation")
}

fn parse_type(raw: &str) -> EquipmentType {
    let kind = EquipmentType::parse(raw);
    if kind == EquipmentType::Unknown {
        print_warning(&format!(
            "Unrecognized equipment type '{}', using generic tables",
            raw
        ));
    }
    kind
}

/// An operator-supplied age is taken as exact
fn stated_age(age: Option<u32>) -> AgeEstimate {
    match age {
        Some(years) => AgeEstimate {
            age: Some(years),
            manufacturing_year: None,
            estimated: false,
            confidence: 100,
            source: None,
        },
        None => AgeEstimate::unknown(),
    }
}
