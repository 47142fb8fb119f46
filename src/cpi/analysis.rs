//! Descriptive aggregations over the combined CPI table.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::loader::{month_date, CpiTable};
use crate::error::{FinError, Result};

/// The CPI categories tracked for month-over-month changes.
pub const ITEMS_OF_INTEREST: [&str; 3] =
    ["All-items excluding food and energy", "Food", "Shelter"];

pub(crate) const ALL_ITEMS: &str = "All-items";
const SERVICES: &str = "Services";
const CANADA: &str = "Canada";

/// Average month-over-month percent change for one (jurisdiction, item).
#[derive(Clone, PartialEq, Debug)]
pub struct AvgChange {
    pub jurisdiction: String,
    pub item: String,
    pub avg_pct: f64,
}

/// Provinces tied for the highest average change in one item.
#[derive(Clone, PartialEq, Debug)]
pub struct TopProvinces {
    pub item: String,
    pub jurisdictions: Vec<String>,
    /// Rounded to one decimal, the granularity ties are judged at.
    pub avg_pct: f64,
}

/// What a reference salary is worth in another jurisdiction.
#[derive(Clone, PartialEq, Debug)]
pub struct EquivalentSalary {
    pub jurisdiction: String,
    pub cpi: f64,
    pub salary: f64,
}

/// First-vs-last annual percent change in Services CPI.
#[derive(Clone, PartialEq, Debug)]
pub struct ServicesInflation {
    pub jurisdiction: String,
    pub first: f64,
    pub last: f64,
    pub annual_pct: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CpiTable {
    /// Chronological CPI series per (jurisdiction, item), restricted to the
    /// given items. BTreeMap keys give deterministic alphabetical output.
    fn series(&self, items: &[&str]) -> BTreeMap<(String, String), Vec<(NaiveDate, f64)>> {
        let mut groups: BTreeMap<(String, String), Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for obs in self.observations() {
            if items.contains(&obs.item.as_str()) {
                groups
                    .entry((obs.jurisdiction.clone(), obs.item.clone()))
                    .or_default()
                    .push((obs.date, obs.cpi));
            }
        }
        for series in groups.values_mut() {
            series.sort_by_key(|(date, _)| *date);
        }
        groups
    }

    /// Mean month-over-month percent change per jurisdiction and item.
    /// Groups with fewer than two readings are skipped.
    pub fn avg_monthly_changes(&self, items: &[&str]) -> Vec<AvgChange> {
        self.series(items)
            .into_iter()
            .filter(|(_, series)| series.len() >= 2)
            .map(|((jurisdiction, item), series)| {
                let changes: Vec<f64> = series
                    .windows(2)
                    .map(|pair| (pair[1].1 / pair[0].1 - 1.0) * 100.0)
                    .collect();
                AvgChange {
                    jurisdiction,
                    item,
                    avg_pct: changes.iter().sum::<f64>() / changes.len() as f64,
                }
            })
            .collect()
    }

    /// For each item, the provinces (Canada excluded) whose average change,
    /// rounded to one decimal, ties for the maximum.
    pub fn provinces_with_highest_change(&self, items: &[&str]) -> Vec<TopProvinces> {
        let mut by_item: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
        for change in self.avg_monthly_changes(items) {
            if change.jurisdiction != CANADA {
                by_item
                    .entry(change.item)
                    .or_default()
                    .push((change.jurisdiction, round1(change.avg_pct)));
            }
        }

        by_item
            .into_iter()
            .filter_map(|(item, provinces)| {
                let max = provinces
                    .iter()
                    .map(|(_, pct)| *pct)
                    .fold(f64::NEG_INFINITY, f64::max);
                if !max.is_finite() {
                    return None;
                }
                let jurisdictions = provinces
                    .iter()
                    .filter(|(_, pct)| (pct - max).abs() < 1e-9)
                    .map(|(jur, _)| jur.clone())
                    .collect();
                Some(TopProvinces {
                    item,
                    jurisdictions,
                    avg_pct: max,
                })
            })
            .collect()
    }

    /// All-items CPI for every jurisdiction in one month.
    fn all_items_at(&self, month: &str) -> Result<BTreeMap<String, f64>> {
        let target = month_date(month)?;
        Ok(self
            .observations()
            .iter()
            .filter(|obs| obs.item == ALL_ITEMS && obs.date == target)
            .map(|obs| (obs.jurisdiction.clone(), obs.cpi))
            .collect())
    }

    /// Salary needed in every other province to match `salary` received in
    /// the base jurisdiction, using the All-items CPI ratio for `month`.
    pub fn equivalent_salaries(
        &self,
        salary: f64,
        base: &str,
        month: &str,
    ) -> Result<Vec<EquivalentSalary>> {
        let cpis = self.all_items_at(month)?;
        let base_cpi = *cpis.get(base).ok_or_else(|| {
            FinError::data(format!("no All-items CPI for {base} in {month}"))
        })?;

        Ok(cpis
            .iter()
            .filter(|(jur, _)| jur.as_str() != base && jur.as_str() != CANADA)
            .map(|(jur, cpi)| EquivalentSalary {
                jurisdiction: jur.clone(),
                cpi: *cpi,
                salary: round2(salary * cpi / base_cpi),
            })
            .collect())
    }

    /// Annual percent change in Services CPI per jurisdiction, comparing the
    /// first and last available readings.
    pub fn services_inflation(&self) -> Vec<ServicesInflation> {
        self.series(&[SERVICES])
            .into_iter()
            .filter(|(_, series)| series.len() >= 2)
            .map(|((jurisdiction, _), series)| {
                let first = series[0].1;
                let last = series[series.len() - 1].1;
                ServicesInflation {
                    jurisdiction,
                    first,
                    last,
                    annual_pct: round1((last - first) / first * 100.0),
                }
            })
            .collect()
    }

    /// The jurisdiction with the highest Services inflation; ties resolve to
    /// the alphabetically first.
    pub fn top_services_inflation(&self) -> Option<ServicesInflation> {
        self.services_inflation()
            .into_iter()
            .reduce(|best, next| if next.annual_pct > best.annual_pct { next } else { best })
    }
}
