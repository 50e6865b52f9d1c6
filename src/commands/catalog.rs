use crate::core::EstimatedValue;
use crate::errors::CertigradeError;
use crate::grading::value::validate_base_value;
use crate::io::output::OutputFormat;
use crate::services::{compare_grading_services, worth_grading, GradingServiceInfo, ServiceTier};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::io::{self, Write};

pub fn show_services(format: OutputFormat) -> Result<()> {
    let services = compare_grading_services();
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&services)?)?,
        OutputFormat::Markdown => write_services_markdown(&mut out, &services)?,
        OutputFormat::Terminal => write_services_terminal(&mut out, &services)?,
    }
    Ok(())
}

fn write_services_markdown(out: &mut impl Write, services: &[GradingServiceInfo]) -> Result<()> {
    writeln!(out, "| Company | Reputation | Average Cost | Turnaround | Specialties |")?;
    writeln!(out, "|---------|------------|--------------|------------|-------------|")?;
    for service in services {
        writeln!(
            out,
            "| {} | {:.1} | ${:.2} | {} | {} |",
            service.name,
            service.reputation,
            service.average_cost,
            service.turnaround_time,
            service.specialties.join(", ")
        )?;
    }
    Ok(())
}

fn write_services_terminal(out: &mut impl Write, services: &[GradingServiceInfo]) -> Result<()> {
    writeln!(out, "{}", "Grading services".bold())?;
    for service in services {
        writeln!(
            out,
            "  {:<12} {:>4.1}  ${:<7.2} {:<20} {}",
            service.name.bright_white(),
            service.reputation,
            service.average_cost,
            service.turnaround_time,
            service.specialties.join(", ").dimmed()
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CostReport {
    tier: ServiceTier,
    cost: f64,
    turnaround_time: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    worth_grading: Option<bool>,
}

/// Cost of `tier`; when both values are given, also whether the expected
/// uplift covers that cost.
pub fn show_cost(
    tier: ServiceTier,
    base_value: Option<f64>,
    estimated_value: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let estimate = tier.cost_estimate();
    let worth = match (base_value, estimated_value) {
        (Some(base), Some(estimated)) => {
            validate_base_value(base)?;
            let estimated = EstimatedValue::new(estimated).map_err(|reason| {
                CertigradeError::invalid_input(format!("estimated value {}: {}", estimated, reason))
            })?;
            Some(worth_grading(base, estimated, tier))
        }
        _ => None,
    };

    let report = CostReport {
        tier,
        cost: estimate.cost,
        turnaround_time: estimate.turnaround_time,
        description: estimate.description,
        worth_grading: worth,
    };

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        OutputFormat::Markdown | OutputFormat::Terminal => {
            writeln!(
                out,
                "{} service: ${:.2} per card, {}",
                report.tier, report.cost, report.turnaround_time
            )?;
            writeln!(out, "  {}", report.description)?;
            match report.worth_grading {
                Some(true) => writeln!(out, "  {}", "Worth grading at this tier".green())?,
                Some(false) => writeln!(out, "  {}", "Uplift does not cover the cost".yellow())?,
                None => {}
            }
        }
    }
    Ok(())
}
