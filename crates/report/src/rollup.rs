use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use tahsilat_core::{day_of, month_of, week_of, CollectionEntry, DateRange, Lira};

/// Bucket for entries whose salesperson field is empty.
const UNKNOWN_SALESPERSON: &str = "Bilinmeyen";

/// One salesperson's running totals relative to a reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonTotals {
    pub daily: Lira,
    pub weekly: Lira,
    pub monthly: Lira,
    pub entry_count: usize,
}

impl Default for SalespersonTotals {
    fn default() -> Self {
        SalespersonTotals {
            daily: Lira::zero(),
            weekly: Lira::zero(),
            monthly: Lira::zero(),
            entry_count: 0,
        }
    }
}

/// Sum of entries whose date falls inside `range`, optionally restricted
/// to one salesperson.
pub fn period_total(
    entries: &[CollectionEntry],
    range: DateRange,
    salesperson: Option<&str>,
) -> Lira {
    entries
        .iter()
        .filter(|e| range.contains(e.date))
        .filter(|e| salesperson.map_or(true, |s| e.salesperson == s))
        .fold(Lira::zero(), |acc, e| acc + e.amount)
}

pub fn daily_total(entries: &[CollectionEntry], salesperson: Option<&str>, today: NaiveDate) -> Lira {
    period_total(entries, day_of(today), salesperson)
}

pub fn weekly_total(entries: &[CollectionEntry], salesperson: Option<&str>, today: NaiveDate) -> Lira {
    period_total(entries, week_of(today), salesperson)
}

pub fn monthly_total(entries: &[CollectionEntry], salesperson: Option<&str>, today: NaiveDate) -> Lira {
    period_total(entries, month_of(today), salesperson)
}

/// Sum over every entry, no date filter — the grand total line under the
/// entry table.
pub fn grand_total(entries: &[CollectionEntry]) -> Lira {
    entries.iter().fold(Lira::zero(), |acc, e| acc + e.amount)
}

/// Daily / weekly / monthly totals per salesperson, all relative to
/// `today`. Every entry counts toward its salesperson's `entry_count`
/// even when it falls outside all three windows.
pub fn salesperson_rollup(
    entries: &[CollectionEntry],
    today: NaiveDate,
) -> BTreeMap<String, SalespersonTotals> {
    let day = day_of(today);
    let week = week_of(today);
    let month = month_of(today);

    let mut totals: BTreeMap<String, SalespersonTotals> = BTreeMap::new();
    for entry in entries {
        let name = if entry.salesperson.is_empty() {
            UNKNOWN_SALESPERSON
        } else {
            entry.salesperson.as_str()
        };
        let t = totals.entry(name.to_string()).or_default();
        t.entry_count += 1;
        if day.contains(entry.date) {
            t.daily = t.daily + entry.amount;
        }
        if week.contains(entry.date) {
            t.weekly = t.weekly + entry.amount;
        }
        if month.contains(entry.date) {
            t.monthly = t.monthly + entry.amount;
        }
    }
    totals
}

/// Entries from the month containing `today` — the table only displays the
/// current month.
pub fn month_to_date<'a>(
    entries: &'a [CollectionEntry],
    today: NaiveDate,
) -> Vec<&'a CollectionEntry> {
    let month = month_of(today);
    entries.iter().filter(|e| month.contains(e.date)).collect()
}
