//! Normalizes raw transactions into ledger-ready records.
//!
//! Mapping resolves the originating entity, assigns a ledger account,
//! converts the amount into the reporting currency and runs the business-rule
//! checks. It never fails: lookups that miss fall back to defaults and rule
//! violations are reported through [`Validation`].
use crate::core::accounts::{ChartOfAccounts, is_unmapped};
use crate::core::config::{AppConfig, RulesConfig};
use crate::core::context::ReportingContext;
use crate::core::currency::{CurrencyRateProvider, StaticRateTable, resolve_rate};
use crate::core::transaction::{
    CurrencyConversion, MappedTransaction, RawTransaction, SourceEntity, Validation,
};
use serde::Serialize;
use tracing::{debug, warn};

pub struct Mapper {
    accounts: ChartOfAccounts,
    rates: Box<dyn CurrencyRateProvider + Send + Sync>,
    rules: RulesConfig,
    target_currency: String,
}

/// Result of mapping a batch of transactions under a [`ReportingContext`].
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    pub context: ReportingContext,
    pub target_currency: String,
    pub transactions: Vec<MappedTransaction>,
    /// Transactions the context excluded
    pub skipped: usize,
    /// Mapped transactions with validation errors
    pub flagged: usize,
    /// Mapped transactions that fell back to the unmapped account
    pub unmapped: usize,
}

impl Mapper {
    pub fn new(
        accounts: ChartOfAccounts,
        rates: Box<dyn CurrencyRateProvider + Send + Sync>,
        rules: RulesConfig,
        target_currency: impl Into<String>,
    ) -> Self {
        Self {
            accounts,
            rates,
            rules,
            target_currency: target_currency.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let accounts = ChartOfAccounts::new(config.accounts.clone());
        let rates = StaticRateTable::from_config(&config.rates);
        debug!(
            accounts = accounts.len(),
            rates = rates.len(),
            currency = %config.currency,
            "Building mapper"
        );
        if accounts.is_empty() {
            warn!("No account mappings configured, every category will be unmapped");
        }
        if rates.is_empty() {
            warn!("No exchange rates configured, foreign amounts convert at 1");
        }

        Self::new(
            accounts,
            Box::new(rates),
            config.rules.clone(),
            config.currency.clone(),
        )
    }

    pub fn target_currency(&self) -> &str {
        &self.target_currency
    }

    pub fn map_transaction(&self, raw: &RawTransaction) -> MappedTransaction {
        let source_entity = SourceEntity::parse(&raw.source);
        let target_account = self.accounts.resolve(&raw.category).to_string();

        let mut validation = Validation::new();

        let rate = resolve_rate(self.rates.as_ref(), &raw.currency, &self.target_currency);
        let converted = match raw.amount.checked_mul(rate) {
            Some(converted) => converted,
            None => {
                validation.fail(format!(
                    "Converted amount of {} {} at rate {} exceeds the decimal range",
                    raw.amount, raw.currency, rate
                ));
                raw.amount.saturating_mul(rate)
            }
        };
        let currency = CurrencyConversion {
            original: raw.currency.clone(),
            converted,
            rate,
        };

        self.check_revenue_volume(&target_account, &currency, &mut validation);
        self.check_intercompany_approval(raw, &source_entity, &mut validation);

        debug!(
            id = %raw.id,
            account = %target_account,
            status = %validation.status,
            "Mapped transaction"
        );

        MappedTransaction {
            id: raw.id.clone(),
            source_entity,
            target_account,
            currency,
            validation,
        }
    }

    pub fn map_batch(&self, raws: &[RawTransaction], context: &ReportingContext) -> MappingReport {
        let mut report = MappingReport {
            context: context.clone(),
            target_currency: self.target_currency.clone(),
            transactions: Vec::with_capacity(raws.len()),
            skipped: 0,
            flagged: 0,
            unmapped: 0,
        };

        for raw in raws {
            if !context.includes(raw) {
                report.skipped += 1;
                continue;
            }

            let mapped = self.map_transaction(raw);
            if !mapped.validation.is_ok() {
                report.flagged += 1;
            }
            if is_unmapped(&mapped.target_account) {
                report.unmapped += 1;
            }
            report.transactions.push(mapped);
        }

        debug!(
            mapped = report.transactions.len(),
            skipped = report.skipped,
            flagged = report.flagged,
            "Mapped batch"
        );
        report
    }

    fn check_revenue_volume(
        &self,
        account: &str,
        currency: &CurrencyConversion,
        validation: &mut Validation,
    ) {
        if !account.starts_with(&self.rules.revenue_prefix) {
            return;
        }

        if currency.converted > self.rules.revenue_limit {
            validation.fail(format!(
                "Revenue volume {} {} exceeds 115% of historical norms",
                currency.converted, self.target_currency
            ));
        } else {
            validation.pass("Revenue volume within historical norms");
        }
    }

    fn check_intercompany_approval(
        &self,
        raw: &RawTransaction,
        entity: &SourceEntity,
        validation: &mut Validation,
    ) {
        let is_settlement =
            entity.is_company() && raw.category.contains(&self.rules.intercompany_keyword);
        if !is_settlement {
            validation.pass("Intercompany approval: N/A");
            return;
        }

        if raw.amount > self.rules.intercompany_limit {
            validation.fail(format!(
                "Intercompany settlement of {} {} exceeds {} and is missing approval",
                raw.amount, raw.currency, self.rules.intercompany_limit
            ));
        } else {
            validation.pass("Intercompany settlement within approval limit");
        }
    }
}
