//! Component lifespan assessment

use crate::catalog::EquipmentProfile;
use crate::models::{AgeEstimate, ComponentLifespanEntry, UrgencyBand};

/// Lifespan table for every catalogued component, most urgent first.
///
/// With unknown age every component reads as new: low urgency and full
/// remaining life.
pub fn assess_lifespans(age: &AgeEstimate, profile: &EquipmentProfile) -> Vec<ComponentLifespanEntry> {
    let years = age.age.unwrap_or(0);

    let mut entries: Vec<ComponentLifespanEntry> = profile
        .components
        .iter()
        .map(|component| {
            let life_ratio = years as f64 / component.expected_life as f64;
            let band = UrgencyBand::from_life_ratio(life_ratio);

            ComponentLifespanEntry {
                name: component.name.to_string(),
                current_age: age.age,
                expected_life: component.expected_life,
                remaining_life: component.expected_life.saturating_sub(years),
                replacement_urgency: band.urgency(),
                urgency_band: band,
                estimated_cost: component.replacement_cost.to_string(),
                impact: component.system_impact.to_string(),
                next_action: band.next_action().to_string(),
            }
        })
        .collect();

    // Stable sort keeps catalog order among equal urgencies
    entries.sort_by(|a, b| {
        b.replacement_urgency
            .partial_cmp(&a.replacement_urgency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentCatalog, EquipmentType};

    fn aged(age: Option<u32>) -> AgeEstimate {
        AgeEstimate {
            age,
            ..AgeEstimate::unknown()
        }
    }

    #[test]
    fn test_furnace_lifespans_at_nine_years() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let entries = assess_lifespans(&aged(Some(9)), catalog.profile(EquipmentType::Furnace));

        assert_eq!(entries.len(), 6);
        for pair in entries.windows(2) {
            assert!(pair[0].replacement_urgency >= pair[1].replacement_urgency);
        }

        let ignitor = entries.iter().find(|e| e.name == "Ignitor").unwrap();
        assert_eq!(ignitor.urgency_band, UrgencyBand::Overdue);
        assert_eq!(ignitor.remaining_life, 0);
        assert_eq!(ignitor.next_action, "Schedule immediate replacement");

        let heat_exchanger = entries.iter().find(|e| e.name == "Heat Exchanger").unwrap();
        // 9 / 15 = 0.6
        assert_eq!(heat_exchanger.urgency_band, UrgencyBand::Medium);
        assert_eq!(heat_exchanger.remaining_life, 6);
        assert_eq!(heat_exchanger.current_age, Some(9));
    }

    #[test]
    fn test_unknown_age_reads_as_new() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let entries = assess_lifespans(&AgeEstimate::unknown(), catalog.profile(EquipmentType::WaterHeater));

        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert_eq!(entry.urgency_band, UrgencyBand::Low);
            assert_eq!(entry.remaining_life, entry.expected_life);
            assert_eq!(entry.current_age, None);
            assert_eq!(entry.next_action, "Continue normal maintenance");
        }
    }

    #[test]
    fn test_remaining_life_never_negative() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let entries = assess_lifespans(&aged(Some(40)), catalog.profile(EquipmentType::Generator));
        assert!(entries.iter().all(|e| e.remaining_life == 0));
        assert!(entries.iter().all(|e| e.replacement_urgency == 0.95));
    }
}
