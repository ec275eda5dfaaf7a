//! Balance sheet identity check: Assets = Liabilities + Equity.
use crate::core::hierarchy::{FinancialHierarchy, aggregate_node};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Absolute tolerance accepted between the two sides of the identity.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.01);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    pub is_valid: bool,
    /// `assets - (liabilities + equity)`
    pub diff: Decimal,
    pub assets_total: Decimal,
    pub liabilities_total: Decimal,
    pub equity_total: Decimal,
}

pub fn validate_balance_sheet(hierarchy: &FinancialHierarchy) -> BalanceCheck {
    validate_balance_sheet_with_tolerance(hierarchy, DEFAULT_TOLERANCE)
}

/// Aggregates each side independently and compares the root actuals.
///
/// The tolerance is absolute, not relative to the size of the sheet. An
/// out-of-balance sheet is a normal result with `is_valid == false`. Totals
/// and `diff` saturate at the bounds of [`Decimal`].
pub fn validate_balance_sheet_with_tolerance(
    hierarchy: &FinancialHierarchy,
    tolerance: Decimal,
) -> BalanceCheck {
    let assets_total = aggregate_node(&hierarchy.assets).value.actual;
    let liabilities_total = aggregate_node(&hierarchy.liabilities).value.actual;
    let equity_total = aggregate_node(&hierarchy.equity).value.actual;

    let diff = assets_total.saturating_sub(liabilities_total.saturating_add(equity_total));
    let is_valid = diff.abs() < tolerance;
    debug!(
        %assets_total,
        %liabilities_total,
        %equity_total,
        %diff,
        is_valid,
        "Balance sheet checked"
    );

    BalanceCheck {
        is_valid,
        diff,
        assets_total,
        liabilities_total,
        equity_total,
    }
}
