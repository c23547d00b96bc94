//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use maintenance_lib::{ComponentStatus, Priority, RiskBand, UrgencyBand};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Render rows as a rounded table, or a notice when empty
pub fn print_rows<T: Tabled>(rows: Vec<T>, empty_message: &str) {
    if rows.is_empty() {
        println!("{}", empty_message.yellow());
        return;
    }
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Section heading with an underline
pub fn print_heading(title: &str, width: usize) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(width));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Whole-dollar amounts
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Fraction in [0, 1] as a percentage
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn format_years(years: Option<u32>) -> String {
    match years {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{} years", n),
        None => "unknown".to_string(),
    }
}

pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.to_string()
    }
}

/// Unix seconds as a UTC timestamp
pub fn format_epoch(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

pub fn color_risk(band: RiskBand) -> String {
    let label = band.as_str().to_uppercase();
    match band {
        RiskBand::High => label.red().bold().to_string(),
        RiskBand::Medium => label.yellow().to_string(),
        RiskBand::Low => label.green().to_string(),
    }
}

pub fn color_priority(priority: Priority) -> String {
    let label = priority.as_str();
    match priority {
        Priority::Critical => label.red().bold().to_string(),
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.blue().to_string(),
    }
}

/// The serde name of a unit enum variant
pub fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

pub fn color_urgency(band: UrgencyBand) -> String {
    let label = wire_name(&band);
    match band {
        UrgencyBand::Overdue | UrgencyBand::Critical => label.red().to_string(),
        UrgencyBand::High => label.yellow().to_string(),
        UrgencyBand::Medium | UrgencyBand::Low => label.green().to_string(),
    }
}

pub fn color_status(status: ComponentStatus) -> String {
    match status {
        ComponentStatus::Healthy => "healthy".green().to_string(),
        ComponentStatus::Degraded => "degraded".yellow().to_string(),
        ComponentStatus::Unhealthy => "unhealthy".red().to_string(),
    }
}

/// Color an overall confidence on the 0-100 scale
pub fn color_confidence(confidence: f64) -> String {
    let formatted = format!("{:.0}%", confidence);
    if confidence >= 60.0 {
        formatted.green().to_string()
    } else if confidence >= 30.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}
