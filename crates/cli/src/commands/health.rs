//! Service health check

use anyhow::Result;
use maintenance_lib::HealthResponse;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_status, format_epoch, print_json, print_rows, print_success, OutputFormat};

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Last Check")]
    last_check: String,
}

/// Query `/healthz`; fails when the service reports unhealthy
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let (status, health): (_, HealthResponse) = client.get("healthz").await?;

    match format {
        OutputFormat::Json => print_json(&health)?,
        OutputFormat::Table => {
            let mut components: Vec<_> = health.components.iter().collect();
            components.sort_by(|a, b| a.0.cmp(b.0));

            let rows = components
                .into_iter()
                .map(|(name, c)| ComponentRow {
                    name: name.clone(),
                    status: color_status(c.status),
                    message: c.message.clone().unwrap_or_default(),
                    last_check: format_epoch(c.last_check_timestamp),
                })
                .collect();
            print_rows(rows, "No components registered");
        }
    }

    if !health.status.is_operational() {
        anyhow::bail!("Service is unhealthy ({})", status);
    }

    if format == OutputFormat::Table {
        print_success(&format!("Service is {}", color_status(health.status)));
    }

    Ok(())
}
