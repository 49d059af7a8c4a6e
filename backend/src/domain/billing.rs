//! Rental billing computation.
//!
//! A settled return produces one [`BillLine`] per consumed loan and a
//! [`Bill`] aggregating them. Charging is by elapsed whole days with a
//! minimum of one, so a same-day return is still billed for a full day;
//! a completed loan is never zero-charged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item::{CostPerDay, Item, ItemName};

/// Minimum number of days any completed loan is billed for.
pub const MIN_CHARGEABLE_DAYS: u64 = 1;

/// Whole days to bill for a loan opened at `borrowed_at` and settled at
/// `now`: the floor of the elapsed duration in days, never below
/// [`MIN_CHARGEABLE_DAYS`]. A `now` earlier than `borrowed_at` (clock skew)
/// also bills the minimum.
pub fn chargeable_days(borrowed_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let whole_days = now.signed_duration_since(borrowed_at).num_days();
    u64::try_from(whole_days).map_or(MIN_CHARGEABLE_DAYS, |days| days.max(MIN_CHARGEABLE_DAYS))
}

/// Per-item charge on a settled bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub item_name: ItemName,
    pub days: u64,
    pub cost_per_day: CostPerDay,
    pub line_total: u64,
}

impl BillLine {
    /// Compute the charge for one item over the loan window.
    pub fn compute(item: &Item, borrowed_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = chargeable_days(borrowed_at, now);
        let cost_per_day = item.cost_per_day();
        Self {
            item_name: item.name().clone(),
            days,
            cost_per_day,
            line_total: days.saturating_mul(cost_per_day.minor_units()),
        }
    }
}

/// Ordered per-item charges and their aggregate total, produced when a
/// user's open loans are settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    lines: Vec<BillLine>,
    total: u64,
}

impl Bill {
    /// Aggregate the given lines; the total is their saturating sum.
    pub fn from_lines(lines: Vec<BillLine>) -> Self {
        let total = lines
            .iter()
            .fold(0_u64, |acc, line| acc.saturating_add(line.line_total));
        Self { lines, total }
    }

    /// Per-item charges in settlement order.
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Aggregate charge in minor currency units.
    pub fn total(&self) -> u64 {
        self.total
    }
}
