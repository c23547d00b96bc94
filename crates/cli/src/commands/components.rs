//! Component lifespan table from the local catalog

use anyhow::Result;
use colored::Colorize;
use maintenance_lib::engine::assess_lifespans;
use tabled::Tabled;

use super::{load_catalog, parse_type, stated_age};
use crate::output::{color_urgency, format_percent, format_years, print_json, print_rows, OutputFormat};

#[derive(Tabled)]
pub(crate) struct LifespanRow {
    #[tabled(rename = "Component")]
    pub name: String,
    #[tabled(rename = "Expected")]
    pub expected: String,
    #[tabled(rename = "Remaining")]
    pub remaining: String,
    #[tabled(rename = "Urgency")]
    pub urgency: String,
    #[tabled(rename = "Band")]
    pub band: String,
    #[tabled(rename = "Cost")]
    pub cost: String,
    #[tabled(rename = "Next Action")]
    pub next_action: String,
}

impl From<&maintenance_lib::ComponentLifespanEntry> for LifespanRow {
    fn from(entry: &maintenance_lib::ComponentLifespanEntry) -> Self {
        Self {
            name: entry.name.clone(),
            expected: format_years(Some(entry.expected_life)),
            remaining: format_years(Some(entry.remaining_life)),
            urgency: format_percent(entry.replacement_urgency),
            band: color_urgency(entry.urgency_band),
            cost: entry.estimated_cost.clone(),
            next_action: entry.next_action.clone(),
        }
    }
}

/// Show component lifespans for an equipment type
pub fn show_components(equipment_type: &str, age: Option<u32>, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog()?;
    let kind = parse_type(equipment_type);
    let entries = assess_lifespans(&stated_age(age), catalog.profile(kind));

    match format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => {
            println!(
                "{} {} (age: {})",
                "Component lifespans for".bold(),
                kind.as_str().cyan(),
                format_years(age)
            );
            println!();
            print_rows(
                entries.iter().map(LifespanRow::from).collect(),
                "No components tracked for this equipment type",
            );
        }
    }

    Ok(())
}
