//! Cost ledger summaries by code, category, and WBS node.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use pcx_core::entities::{CostCode, CostTransaction, Validate};
use pcx_core::enums::EntryType;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::wbs::TreeBuild;

/// Category assigned to transactions whose cost code is not in the code list.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Per-group totals of each entry type plus the derived variance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTotals {
    pub budget: f64,
    pub actual: f64,
    pub commitment: f64,
    pub forecast: f64,
    /// `budget - actual`
    pub variance: f64,
    /// `variance / budget * 100`, or 0 when there is no budget.
    pub variance_percent: f64,
}

impl CostTotals {
    fn add(&mut self, entry_type: EntryType, amount: f64) {
        match entry_type {
            EntryType::Budget => self.budget += amount,
            EntryType::Actual => self.actual += amount,
            EntryType::Commitment => self.commitment += amount,
            EntryType::Forecast => self.forecast += amount,
        }
        self.refresh();
    }

    fn absorb(&mut self, other: &Self) {
        self.budget += other.budget;
        self.actual += other.actual;
        self.commitment += other.commitment;
        self.forecast += other.forecast;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.variance = self.budget - self.actual;
        self.variance_percent = if self.budget == 0.0 {
            0.0
        } else {
            self.variance / self.budget * 100.0
        };
    }

    /// Amount recorded for one entry type.
    #[must_use]
    pub const fn amount(&self, entry_type: EntryType) -> f64 {
        match entry_type {
            EntryType::Budget => self.budget,
            EntryType::Actual => self.actual,
            EntryType::Commitment => self.commitment,
            EntryType::Forecast => self.forecast,
        }
    }
}

/// Ledger summary for one project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    /// `None` for a full-history summary.
    pub as_of: Option<NaiveDate>,
    pub by_code: BTreeMap<String, CostTotals>,
    pub by_category: BTreeMap<String, CostTotals>,
    /// Only codes linked to a WBS node, keyed by the node id.
    pub by_wbs: BTreeMap<String, CostTotals>,
    /// Codes with no WBS link (including unknown codes).
    pub unlinked: CostTotals,
    pub totals: CostTotals,
    /// Cost code ids referenced by transactions but missing from the code list.
    pub unknown_codes: Vec<String>,
    pub transaction_count: usize,
}

/// Summarize transactions, keeping only `entry_date <= as_of` when a date is
/// given.
///
/// # Errors
///
/// - [`EngineError::Structural`] when two cost codes share an id.
/// - [`EngineError::InvalidInput`] when a transaction amount is not finite.
pub fn summarize(
    codes: &[CostCode],
    transactions: &[CostTransaction],
    as_of: Option<NaiveDate>,
) -> Result<CostSummary, EngineError> {
    let mut code_index: HashMap<&str, &CostCode> = HashMap::with_capacity(codes.len());
    for code in codes {
        if code_index.insert(code.id.as_str(), code).is_some() {
            return Err(EngineError::structural(&code.id, "duplicate cost code id"));
        }
    }

    let mut summary = CostSummary {
        as_of,
        ..CostSummary::default()
    };

    for transaction in transactions {
        transaction.validate()?;
        if as_of.is_some_and(|limit| transaction.entry_date > limit) {
            continue;
        }
        summary.transaction_count += 1;

        let code_id = transaction.cost_code_id.as_str();
        let (category, wbs_id) = match code_index.get(code_id) {
            Some(code) => (code.category.as_str(), code.wbs_id.as_deref()),
            None => {
                if !summary.unknown_codes.iter().any(|known| known == code_id) {
                    tracing::warn!(cost_code = code_id, "cost: transaction references unknown cost code");
                    summary.unknown_codes.push(code_id.to_string());
                }
                (UNCATEGORIZED, None)
            }
        };

        let (entry_type, amount) = (transaction.entry_type, transaction.amount);
        summary
            .by_code
            .entry(code_id.to_string())
            .or_default()
            .add(entry_type, amount);
        summary
            .by_category
            .entry(category.to_string())
            .or_default()
            .add(entry_type, amount);
        match wbs_id {
            Some(wbs_id) => summary
                .by_wbs
                .entry(wbs_id.to_string())
                .or_default()
                .add(entry_type, amount),
            None => summary.unlinked.add(entry_type, amount),
        }
        summary.totals.add(entry_type, amount);
    }

    tracing::debug!(
        transactions = summary.transaction_count,
        codes = summary.by_code.len(),
        budget = summary.totals.budget,
        actual = summary.totals.actual,
        "cost: ledger summarized"
    );
    Ok(summary)
}

/// Aggregate linked-code totals bottom-up: each node carries its own codes
/// plus every descendant's. Plain sums, no weightage.
///
/// Costs linked to ids that are not in the tree are left out and logged.
#[must_use]
pub fn roll_up_costs(build: &TreeBuild, summary: &CostSummary) -> BTreeMap<String, CostTotals> {
    let tree = &build.tree;
    let mut totals = vec![CostTotals::default(); tree.len()];

    for slot in tree.post_order() {
        let entry = tree.at(slot);
        let mut node_total = summary
            .by_wbs
            .get(&entry.node.id)
            .copied()
            .unwrap_or_default();
        for &child in &entry.children {
            node_total.absorb(&totals[child]);
        }
        totals[slot] = node_total;
    }

    for wbs_id in summary.by_wbs.keys() {
        if tree.slot(wbs_id).is_none() {
            tracing::warn!(wbs_id = %wbs_id, "cost: costs linked to a WBS node that is not in the tree");
        }
    }

    (0..tree.len())
        .map(|slot| (tree.at(slot).node.id.clone(), totals[slot]))
        .collect()
}
