//! Category to ledger account resolution

use std::collections::BTreeMap;
use tracing::debug;

/// Ledger code assigned to categories that have no entry in the chart.
pub const UNMAPPED_ACCOUNT: &str = "9-9999 (Unmapped)";

#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    entries: BTreeMap<String, String>,
}

impl ChartOfAccounts {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Exact-match lookup; a miss yields [`UNMAPPED_ACCOUNT`].
    pub fn resolve(&self, category: &str) -> &str {
        match self.entries.get(category) {
            Some(code) => code.as_str(),
            None => {
                debug!("Category '{category}' has no ledger mapping");
                UNMAPPED_ACCOUNT
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn is_unmapped(account: &str) -> bool {
    account == UNMAPPED_ACCOUNT
}
