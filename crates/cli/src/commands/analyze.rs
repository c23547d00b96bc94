//! Full maintenance analysis, local or through the service

use anyhow::{Context, Result};
use colored::Colorize;
use maintenance_lib::{AnalysisRequest, AnalysisResponse, MaintenanceAnalysis, MaintenanceEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tabled::Tabled;

use super::components::LifespanRow;
use super::load_catalog;
use super::schedule::print_schedule;
use crate::client::ApiClient;
use crate::output::{
    color_confidence, color_priority, color_risk, format_currency, format_percent,
    format_timestamp, format_years, print_heading, print_info, print_json, print_rows,
    print_warning, wire_name, OutputFormat,
};

const ANALYSIS_PATH: &str = "api/predictive-maintenance";

#[derive(Tabled)]
struct RiskRow {
    #[tabled(rename = "Factor")]
    factor: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Timeframe")]
    timeframe: &'static str,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Impact")]
    impact: String,
}

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "When")]
    timeframe: String,
}

/// Run the engine in-process
pub fn analyze_local(request: &AnalysisRequest, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let engine = MaintenanceEngine::new(Arc::new(load_catalog()?));
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let analysis = engine.analyze(request, &mut rng);
    print_analysis(&analysis, None, format)
}

/// Submit the request to the analysis service
pub async fn analyze_remote(
    client: &ApiClient,
    request: &AnalysisRequest,
    format: OutputFormat,
) -> Result<()> {
    let (status, response): (_, AnalysisResponse) = client.post(ANALYSIS_PATH, request).await?;

    if !response.success {
        let error = response
            .error
            .unwrap_or_else(|| "no error message".to_string());
        match response.retry_after {
            Some(secs) => anyhow::bail!("Analysis rejected ({}): {} Retry in {}s", status, error, secs),
            None => anyhow::bail!("Analysis rejected ({}): {}", status, error),
        }
    }

    let analysis = response
        .analysis
        .context("Service reported success without an analysis")?;
    print_analysis(&analysis, response.timestamp.as_deref(), format)
}

fn print_analysis(
    analysis: &MaintenanceAnalysis,
    timestamp: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(analysis);
    }

    let equipment = &analysis.equipment;
    let age = &analysis.current_age;
    let describe = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    print_heading("Maintenance Analysis", 60);
    println!(
        "Equipment:    {} {} {}",
        equipment.kind().as_str().cyan(),
        describe(&equipment.brand),
        describe(&equipment.model)
    );
    match age.manufacturing_year {
        Some(year) => println!(
            "Age:          {} (built {}, {}% confidence{})",
            format_years(age.age),
            year,
            age.confidence,
            if age.estimated { ", estimated" } else { "" }
        ),
        None => println!("Age:          {}", format_years(age.age)),
    }
    println!(
        "Overall risk: {}",
        color_risk(analysis.risk_assessment.overall_risk)
    );
    println!("Confidence:   {}", color_confidence(analysis.confidence));
    if let Some(ts) = timestamp {
        println!("Analyzed at:  {}", format_timestamp(ts));
    }
    println!();

    let risk = &analysis.risk_assessment;
    print_heading("Risk Factors", 60);
    let factors = [
        ("Age", &risk.age_risk),
        ("Environment", &risk.environmental_risk),
        ("Usage", &risk.usage_risk),
        ("Maintenance", &risk.maintenance_risk),
    ];
    print_rows(
        factors
            .into_iter()
            .map(|(factor, f)| RiskRow {
                factor,
                score: format!("{:.2}", f.score),
                confidence: wire_name(&f.confidence),
                reason: f.reason.clone(),
            })
            .collect(),
        "No risk factors",
    );
    println!();

    print_heading("Failure Predictions", 60);
    print_rows(
        analysis
            .failure_predictions
            .iter()
            .map(|p| PredictionRow {
                component: p.component.clone(),
                timeframe: p.timeframe.label(),
                probability: format_percent(p.probability),
                cost: p.cost.clone().unwrap_or_default(),
                impact: p.impact.clone().unwrap_or_default(),
            })
            .collect(),
        "No failure predictions",
    );
    println!();

    print_heading("Component Lifespans", 60);
    print_rows(
        analysis.component_lifespan.iter().map(LifespanRow::from).collect(),
        "No components tracked for this equipment type",
    );
    println!();

    print_heading("Maintenance Schedule", 60);
    print_schedule(&analysis.maintenance_schedule);
    println!();

    let cost = &analysis.cost_analysis;
    print_heading("Cost Analysis", 60);
    println!("Current value:      {}", format_currency(cost.current_value));
    println!("Replacement cost:   {}", format_currency(cost.replacement_cost));
    println!("Maintenance cost:   {}/yr", format_currency(cost.maintenance_cost));
    println!("Energy savings:     {}/yr", format_currency(cost.energy_savings));
    println!("Breakdown exposure: {}", format_currency(cost.breakdown_risk));
    println!(
        "ROI:                maintain {:.2}, replace {:.2}",
        cost.maintenance_roi, cost.replacement_roi
    );
    println!(
        "Decision:           {}",
        wire_name(&cost.recommendation).to_uppercase().bold()
    );
    println!();

    print_heading("Recommendations", 60);
    if analysis.recommendations.is_empty() {
        print_info("No action needed beyond the standard schedule");
    } else {
        print_rows(
            analysis
                .recommendations
                .iter()
                .map(|r| RecommendationRow {
                    priority: color_priority(r.priority),
                    kind: wire_name(&r.kind),
                    message: r.message.clone(),
                    action: r.action.clone(),
                    timeframe: r.timeframe.clone(),
                })
                .collect(),
            "",
        );
    }

    if age.age.is_none() {
        println!();
        print_warning("Age unknown: add --manufacturing or --serial for sharper predictions");
    }

    Ok(())
}
