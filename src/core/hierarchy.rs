//! Budget/actual trees and their bottom-up aggregation.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialValue {
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub actual: Decimal,
    #[serde(default)]
    pub variance: Decimal,
}

impl FinancialValue {
    /// Variance saturates at the bounds of [`Decimal`].
    pub fn new(budget: Decimal, actual: Decimal) -> Self {
        Self {
            budget,
            actual,
            variance: actual.saturating_sub(budget),
        }
    }

    /// Variance as a percentage of budget, `None` when there is no budget or
    /// the ratio does not fit in a [`Decimal`].
    pub fn variance_pct(&self) -> Option<Decimal> {
        if self.budget.is_zero() {
            return None;
        }
        self.variance
            .checked_div(self.budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub value: FinancialValue,
    #[serde(default)]
    pub children: Vec<FinancialNode>,
}

impl FinancialNode {
    pub fn leaf(
        id: impl Into<String>,
        label: impl Into<String>,
        budget: Decimal,
        actual: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: FinancialValue::new(budget, actual),
            children: Vec::new(),
        }
    }

    /// Internal node; its own value stays zero until aggregated.
    pub fn group(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<FinancialNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: FinancialValue::default(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first listing of the tree with each node's depth, root first.
    pub fn walk(&self) -> Vec<(usize, &FinancialNode)> {
        let mut nodes = Vec::new();
        self.walk_into(0, &mut nodes);
        nodes
    }

    fn walk_into<'a>(&'a self, depth: usize, nodes: &mut Vec<(usize, &'a FinancialNode)>) {
        nodes.push((depth, self));
        for child in &self.children {
            child.walk_into(depth + 1, nodes);
        }
    }

    pub fn find(&self, id: &str) -> Option<&FinancialNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// One balance sheet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHierarchy {
    pub assets: FinancialNode,
    pub liabilities: FinancialNode,
    pub equity: FinancialNode,
}

/// Recomputes totals bottom-up.
///
/// Leaves keep their budget and actual. Internal nodes take the sums of their
/// aggregated children, discarding whatever values they carried. Every node
/// in the result has `variance == actual - budget`. Sums that leave the
/// [`Decimal`] range saturate at `Decimal::MAX` or `Decimal::MIN`.
pub fn aggregate_node(node: &FinancialNode) -> FinancialNode {
    if node.is_leaf() {
        return FinancialNode {
            value: FinancialValue::new(node.value.budget, node.value.actual),
            ..node.clone()
        };
    }

    let children: Vec<FinancialNode> = node.children.iter().map(aggregate_node).collect();
    let budget = saturating_total(children.iter().map(|c| c.value.budget));
    let actual = saturating_total(children.iter().map(|c| c.value.actual));

    FinancialNode {
        id: node.id.clone(),
        label: node.label.clone(),
        value: FinancialValue::new(budget, actual),
        children,
    }
}

fn saturating_total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn aggregate_hierarchy(hierarchy: &FinancialHierarchy) -> FinancialHierarchy {
    FinancialHierarchy {
        assets: aggregate_node(&hierarchy.assets),
        liabilities: aggregate_node(&hierarchy.liabilities),
        equity: aggregate_node(&hierarchy.equity),
    }
}
