pub mod cli;
pub mod core;

use crate::cli::OutputFormat;
use crate::core::balance::{BalanceCheck, validate_balance_sheet_with_tolerance};
use crate::core::config::AppConfig;
use crate::core::context::{Period, ReportingContext};
use crate::core::hierarchy::{FinancialHierarchy, aggregate_hierarchy};
use crate::core::mapper::{Mapper, MappingReport};
use crate::core::transaction::RawTransaction;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Map a JSON array of raw transactions
    Map {
        input: PathBuf,
        company: Option<String>,
        period: Option<Period>,
    },
    /// Aggregate a JSON balance sheet hierarchy
    Aggregate { input: PathBuf },
    /// Check the balance sheet identity of a JSON hierarchy
    Balance { input: PathBuf },
}

/// What a command computed, before it is rendered.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Mapping(MappingReport),
    Aggregation(FinancialHierarchy),
    Balance(BalanceCheck),
}

impl CommandOutput {
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match self {
            CommandOutput::Mapping(report) => cli::map::print(report, format),
            CommandOutput::Aggregation(aggregated) => cli::aggregate::print(aggregated, format),
            CommandOutput::Balance(check) => cli::balance::print(check, format),
        }
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("finnorm starting...");
    execute(command, config_path).await?.print(format)
}

/// Loads the inputs a command needs and computes its result.
pub async fn execute(command: AppCommand, config_path: Option<&str>) -> Result<CommandOutput> {
    match command {
        AppCommand::Map {
            input,
            company,
            period,
        } => {
            let (config, raws) = tokio::try_join!(
                load_config(config_path),
                read_json::<Vec<RawTransaction>>(&input)
            )?;
            debug!("Loaded {} transactions from {}", raws.len(), input.display());

            let mapper = Mapper::from_config(&config);
            let context = ReportingContext::new(company, period);
            Ok(CommandOutput::Mapping(mapper.map_batch(&raws, &context)))
        }
        AppCommand::Aggregate { input } => {
            let hierarchy = read_json::<FinancialHierarchy>(&input).await?;
            Ok(CommandOutput::Aggregation(aggregate_hierarchy(&hierarchy)))
        }
        AppCommand::Balance { input } => {
            let (config, hierarchy) = tokio::try_join!(
                load_config(config_path),
                read_json::<FinancialHierarchy>(&input)
            )?;
            Ok(CommandOutput::Balance(validate_balance_sheet_with_tolerance(
                &hierarchy,
                config.balance_tolerance,
            )))
        }
    }
}

async fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config_path = config_path.map(str::to_string);
    let config =
        tokio::task::spawn_blocking(move || AppConfig::load_or_reference(config_path.as_deref()))
            .await??;
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}
