//! Currency conversion abstractions

use crate::core::config::RateConfig;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

pub trait CurrencyRateProvider: Send + Sync {
    /// Rate that converts one unit of `from` into `to`, if known.
    fn get_rate(&self, from: &str, to: &str) -> Option<Decimal>;
}

/// Fixed rate table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticRateTable {
    rates: HashMap<(String, String), Decimal>,
}

impl StaticRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(rates: &[RateConfig]) -> Self {
        let mut table = Self::new();
        for rate in rates {
            table.insert(&rate.from, &rate.to, rate.rate);
        }
        table
    }

    pub fn insert(&mut self, from: &str, to: &str, rate: Decimal) {
        self.rates.insert((from.to_uppercase(), to.to_uppercase()), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl CurrencyRateProvider for StaticRateTable {
    fn get_rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates
            .get(&(from.to_uppercase(), to.to_uppercase()))
            .copied()
    }
}

/// Rate used to bring `from` into `to`.
///
/// Identical currencies always convert at 1. A pair the provider does not know
/// also falls back to 1, treating the amount as already being in `to`.
pub fn resolve_rate(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    from: &str,
    to: &str,
) -> Decimal {
    if from.eq_ignore_ascii_case(to) {
        debug!("No currency conversion needed ({from} -> {to})");
        return Decimal::ONE;
    }

    match provider.get_rate(from, to) {
        Some(rate) => {
            debug!("Converting {from} -> {to} at rate {rate}");
            rate
        }
        None => {
            debug!("No rate configured for {from} -> {to}, using 1");
            Decimal::ONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> StaticRateTable {
        let mut table = StaticRateTable::new();
        table.insert("USD", "GEL", dec!(2.7));
        table.insert("EUR", "GEL", dec!(2.9));
        table
    }

    #[test]
    fn test_same_currency_is_identity() {
        let mut table = table();
        table.insert("GEL", "GEL", dec!(5));
        assert_eq!(resolve_rate(&table, "GEL", "GEL"), Decimal::ONE);
    }

    #[test]
    fn test_known_pair() {
        assert_eq!(resolve_rate(&table(), "USD", "GEL"), dec!(2.7));
        assert_eq!(resolve_rate(&table(), "usd", "gel"), dec!(2.7));
    }

    #[test]
    fn test_unknown_pair_falls_back_to_one() {
        assert_eq!(resolve_rate(&table(), "JPY", "GEL"), Decimal::ONE);
        // Pairs are directional
        assert_eq!(resolve_rate(&table(), "GEL", "USD"), Decimal::ONE);
    }

    #[test]
    fn test_from_config() {
        let table = StaticRateTable::from_config(&[RateConfig {
            from: "USD".to_string(),
            to: "GEL".to_string(),
            rate: dec!(2.7),
        }]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_rate("USD", "GEL"), Some(dec!(2.7)));
    }
}
