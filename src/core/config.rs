use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

/// Reference configuration shipped with the binary and written by `setup`.
pub const REFERENCE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RateConfig {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RulesConfig {
    /// Ledger code prefix identifying revenue accounts
    #[serde(default = "default_revenue_prefix")]
    pub revenue_prefix: String,
    /// Converted revenue above this amount is flagged
    #[serde(default = "default_revenue_limit")]
    pub revenue_limit: Decimal,
    /// Categories containing this text are intercompany settlements
    #[serde(default = "default_intercompany_keyword")]
    pub intercompany_keyword: String,
    /// Settlements above this raw amount require approval
    #[serde(default = "default_intercompany_limit")]
    pub intercompany_limit: Decimal,
}

fn default_revenue_prefix() -> String {
    "4-".to_string()
}

fn default_revenue_limit() -> Decimal {
    dec!(250000)
}

fn default_intercompany_keyword() -> String {
    "Settlement".to_string()
}

fn default_intercompany_limit() -> Decimal {
    dec!(10000)
}

fn default_balance_tolerance() -> Decimal {
    crate::core::balance::DEFAULT_TOLERANCE
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            revenue_prefix: default_revenue_prefix(),
            revenue_limit: default_revenue_limit(),
            intercompany_keyword: default_intercompany_keyword(),
            intercompany_limit: default_intercompany_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Reporting currency all amounts are converted into
    pub currency: String,
    /// Category to ledger code
    #[serde(default)]
    pub accounts: BTreeMap<String, String>,
    #[serde(default)]
    pub rates: Vec<RateConfig>,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
}

impl AppConfig {
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "finnorm", "finnorm")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Configuration embedded in the binary.
    pub fn reference() -> Result<Self> {
        Self::from_yaml(REFERENCE_CONFIG).context("Embedded reference config is invalid")
    }

    /// Loads `path` when given. Without a path the default location is tried,
    /// then the embedded reference configuration.
    pub fn load_or_reference(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            Self::load_from_path(&default_path)
        } else {
            info!(
                "No config at {}, using reference configuration",
                default_path.display()
            );
            Self::reference()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            bail!("Reporting currency must not be empty");
        }

        let mut seen = HashSet::new();
        for rate in &self.rates {
            if rate.rate <= Decimal::ZERO {
                bail!(
                    "Rate {} -> {} must be positive, got {}",
                    rate.from,
                    rate.to,
                    rate.rate
                );
            }
            if !seen.insert((rate.from.to_uppercase(), rate.to.to_uppercase())) {
                bail!("Duplicate rate for {} -> {}", rate.from, rate.to);
            }
        }

        if let Some((category, _)) = self.accounts.iter().find(|(_, code)| code.trim().is_empty())
        {
            bail!("Category '{category}' maps to an empty ledger code");
        }

        if self.balance_tolerance < Decimal::ZERO {
            bail!("Balance tolerance must not be negative");
        }

        Ok(())
    }
}
