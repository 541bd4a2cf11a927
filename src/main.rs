use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;

use hosp_report::config::DashboardConfig;
use hosp_report::schema::{DateFormatConfig, parse_date_string};
use hosp_report::utils::logging::log_warning;
use hosp_report::{DataLoader, FilterSelection, View, ViewReport, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewArg {
    Overview,
    Doctors,
    Monitoring,
    All,
}

impl ViewArg {
    fn views(self) -> Vec<View> {
        match self {
            Self::Overview => vec![View::Overview],
            Self::Doctors => vec![View::Doctors],
            Self::Monitoring => vec![View::Monitoring],
            Self::All => View::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Filter and aggregate hospital admission and monitoring exports into dashboard reports
#[derive(Debug, Parser)]
#[command(name = "hosp-report", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patient admission source (CSV or Parquet)
    #[arg(long)]
    patients: Option<PathBuf>,

    /// Monitoring source (CSV or Parquet)
    #[arg(long)]
    monitoring: Option<PathBuf>,

    /// First admission date, YYYY-MM-DD or DD/MM/YYYY
    #[arg(long, value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    /// Last admission date, YYYY-MM-DD or DD/MM/YYYY
    #[arg(long, value_parser = parse_cli_date)]
    to: Option<NaiveDate>,

    /// Keep only these conditions; repeat for several
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// First admission date of the cost trend
    #[arg(long, value_parser = parse_cli_date)]
    cost_from: Option<NaiveDate>,

    /// Last admission date of the cost trend
    #[arg(long, value_parser = parse_cli_date)]
    cost_to: Option<NaiveDate>,

    /// Patient shown in the monitoring view
    #[arg(long)]
    patient: Option<String>,

    #[arg(long, value_enum, default_value_t = ViewArg::All)]
    view: ViewArg,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn parse_cli_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let formats = DateFormatConfig {
        datetime_formats: Vec::new(),
        date_formats: vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()],
    };
    parse_date_string(s, &formats)
        .ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD or DD/MM/YYYY"))
}

/// Requested conditions that match no record. `known` is sorted.
fn unknown_conditions<'a>(requested: &'a [String], known: &[String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|c| known.binary_search(*c).is_err())
        .map(String::as_str)
        .collect()
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    }
    .with_env_overrides();

    if let Some(path) = &cli.patients {
        config.patient_data.clone_from(path);
    }
    if let Some(path) = &cli.monitoring {
        config.monitoring_data.clone_from(path);
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let start = Instant::now();
    let mut loader = DataLoader::new(config.clone());
    let dataset = loader.load_dataset().context("Failed to load dashboard data")?;
    info!(
        "Loaded {} admissions and {} monitoring samples in {:?}",
        dataset.patients.len(),
        dataset.monitoring.len(),
        start.elapsed()
    );
    if dataset.patients.is_empty() {
        log_warning("Patient source has no rows", Some(&config.patient_data));
    }

    let mut selection = FilterSelection::for_table(&dataset.patients);
    if let Some(from) = cli.from {
        selection.from = from;
    }
    if let Some(to) = cli.to {
        selection.to = to;
    }
    let known = dataset.patients.condition_options();
    for condition in unknown_conditions(&cli.conditions, &known) {
        log_warning(
            &format!("Condition '{condition}' does not occur in the patient source"),
            Some(&config.patient_data),
        );
    }
    selection.conditions = cli.conditions.iter().cloned().collect();
    selection.cost_from = cli.cost_from;
    selection.cost_to = cli.cost_to;
    selection.patient = cli.patient.clone();

    let reports = cli
        .view
        .views()
        .into_iter()
        .map(|view| {
            render(view, &selection, &dataset, &config)
                .with_context(|| format!("Failed to render {view} view"))
        })
        .collect::<Result<Vec<ViewReport>>>()?;

    match cli.format {
        OutputFormat::Text => {
            let text: Vec<String> = reports.iter().map(ViewReport::to_text).collect();
            println!("{}", text.join("\n"));
        }
        OutputFormat::Json => {
            let json = if let [report] = reports.as_slice() {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string_pretty(&reports)?
            };
            println!("{json}");
        }
    }

    Ok(())
}
