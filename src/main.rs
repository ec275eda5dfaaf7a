use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finnorm::cli::OutputFormat;
use finnorm::core::context::Period;
use finnorm::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for finnorm::AppCommand {
    fn from(cmd: Commands) -> finnorm::AppCommand {
        match cmd {
            Commands::Map {
                input,
                company,
                period,
            } => finnorm::AppCommand::Map {
                input,
                company,
                period,
            },
            Commands::Aggregate { input } => finnorm::AppCommand::Aggregate { input },
            Commands::Balance { input } => finnorm::AppCommand::Balance { input },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Map raw transactions to ledger accounts and validate them
    Map {
        /// JSON file holding an array of transactions
        input: PathBuf,
        /// Only include transactions of this company
        #[arg(long)]
        company: Option<String>,
        /// Only include transactions dated in this period (YYYY, YYYY-MM or FROM..TO)
        #[arg(long)]
        period: Option<Period>,
    },
    /// Aggregate budget and actual values of a balance sheet hierarchy
    Aggregate {
        /// JSON file holding assets, liabilities and equity trees
        input: PathBuf,
    },
    /// Check that assets equal liabilities plus equity
    Balance {
        /// JSON file holding assets, liabilities and equity trees
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let result = match cli.command {
        Some(Commands::Setup) => finnorm::cli::setup::setup(),
        Some(cmd) => finnorm::run_command(cmd.into(), cli.config_path.as_deref(), format).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
