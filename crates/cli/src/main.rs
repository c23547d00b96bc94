//! HVAC Predictive Maintenance CLI
//!
//! Scores equipment risk and lifecycle either against the analysis
//! service or with the engine linked in-process.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analyze, components, health, schedule};
use maintenance_lib::{
    AnalysisMode, AnalysisRequest, EnvironmentDescriptor, EquipmentDescriptor, UsageIntensity,
    UsagePattern,
};

/// HVAC Predictive Maintenance CLI
#[derive(Parser)]
#[command(name = "hvac-pm")]
#[command(author, version, about = "CLI for HVAC Predictive Maintenance scoring", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via PM_API_URL env var)
    #[arg(long, env = "PM_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one unit: risk, failures, schedule, lifespans, costs
    Analyze {
        /// Equipment type (furnace, generator, water_heater, air_conditioner, boiler)
        #[arg(long = "type")]
        equipment_type: String,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Serial number from the data plate
        #[arg(long)]
        serial: Option<String>,

        /// Manufacturing date text, e.g. "2015" or "03/2015"
        #[arg(long)]
        manufacturing: Option<String>,

        /// Usage intensity (heavy, moderate, light)
        #[arg(long)]
        usage: Option<UsageIntensity>,

        #[arg(long)]
        extreme_temperatures: bool,

        #[arg(long)]
        high_humidity: bool,

        #[arg(long)]
        salt_air: bool,

        #[arg(long)]
        dusty: bool,

        /// Tailor the analysis for a homeowner rather than a technician
        #[arg(long)]
        homeowner: bool,

        /// Run the engine locally instead of calling the service
        #[arg(long)]
        local: bool,

        /// Seed for reproducible local runs
        #[arg(long, requires = "local")]
        seed: Option<u64>,
    },

    /// Show component lifespans for an equipment type
    Components {
        /// Equipment type
        equipment_type: String,

        /// Equipment age in years
        #[arg(long)]
        age: Option<u32>,
    },

    /// Show the optimized maintenance schedule for an equipment type
    Schedule {
        /// Equipment type
        equipment_type: String,

        /// Equipment age in years
        #[arg(long)]
        age: Option<u32>,

        /// Usage intensity (heavy, moderate, light)
        #[arg(long)]
        usage: Option<UsageIntensity>,
    },

    /// Check the analysis service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load()?;
    let format = config.resolve_format(cli.format)?;
    let api_url = config.resolve_api_url(cli.api_url);

    match cli.command {
        Commands::Analyze {
            equipment_type,
            brand,
            model,
            serial,
            manufacturing,
            usage,
            extreme_temperatures,
            high_humidity,
            salt_air,
            dusty,
            homeowner,
            local,
            seed,
        } => {
            let environment = EnvironmentDescriptor {
                extreme_temperatures,
                high_humidity,
                salt_air,
                dusty,
            };
            let mut request = AnalysisRequest::new(EquipmentDescriptor {
                brand,
                model,
                serial,
                equipment_type: Some(equipment_type),
                manufacturing,
            });
            request.usage_patterns = usage.map(UsagePattern::new);
            if environment != EnvironmentDescriptor::default() {
                request.environment_data = Some(environment);
            }
            if homeowner {
                request.mode = AnalysisMode::Homeowner;
            }

            if local {
                analyze::analyze_local(&request, seed, format)?;
            } else {
                let client = client::ApiClient::new(&api_url)?;
                analyze::analyze_remote(&client, &request, format).await?;
            }
        }
        Commands::Components {
            equipment_type,
            age,
        } => {
            components::show_components(&equipment_type, age, format)?;
        }
        Commands::Schedule {
            equipment_type,
            age,
            usage,
        } => {
            schedule::show_schedule(&equipment_type, age, usage, format)?;
        }
        Commands::Health => {
            let client = client::ApiClient::new(&api_url)?;
            health::show_health(&client, format).await?;
        }
    }

    Ok(())
}
