//! Optimized maintenance schedule from the local engine

use anyhow::Result;
use colored::Colorize;
use maintenance_lib::engine::optimize_schedule;
use maintenance_lib::{ScheduleOptimization, UsageIntensity, UsagePattern};
use tabled::Tabled;

use super::{load_catalog, parse_type, stated_age};
use crate::output::{format_currency, format_years, print_json, print_rows, OutputFormat};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Interval")]
    interval: &'static str,
    #[tabled(rename = "Task")]
    task: String,
}

/// Print a schedule as an interval/task table followed by its reasoning
pub(crate) fn print_schedule(optimization: &ScheduleOptimization) {
    let schedule = &optimization.schedule;
    let intervals: [(&'static str, &Vec<String>); 5] = [
        ("weekly", &schedule.weekly),
        ("monthly", &schedule.monthly),
        ("quarterly", &schedule.quarterly),
        ("biannual", &schedule.biannual),
        ("annual", &schedule.annual),
    ];

    let rows: Vec<TaskRow> = intervals
        .into_iter()
        .flat_map(|(interval, tasks)| {
            tasks.iter().map(move |task| TaskRow {
                interval,
                task: task.clone(),
            })
        })
        .collect();

    print_rows(rows, "No scheduled tasks");
    println!("{}", optimization.reasoning);
    println!(
        "Estimated savings: {}",
        format_currency(optimization.cost_savings).green()
    );
}

/// Show the optimized schedule for an equipment type
pub fn show_schedule(
    equipment_type: &str,
    age: Option<u32>,
    usage: Option<UsageIntensity>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = load_catalog()?;
    let kind = parse_type(equipment_type);
    let usage = usage.map(UsagePattern::new);
    let optimization = optimize_schedule(&stated_age(age), catalog.profile(kind), usage.as_ref());

    match format {
        OutputFormat::Json => print_json(&optimization)?,
        OutputFormat::Table => {
            println!(
                "{} {} (age: {})",
                "Maintenance schedule for".bold(),
                kind.as_str().cyan(),
                format_years(age)
            );
            println!();
            print_schedule(&optimization);
        }
    }

    Ok(())
}
