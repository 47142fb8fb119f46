//! Minimum-wage records and their CPI-adjusted comparison.

use std::path::Path;

use log::info;
use serde::Deserialize;

use super::analysis::ALL_ITEMS;
use super::loader::{month_date, CpiTable};
use crate::error::{FinError, Result};

/// One row of MinimumWages.csv.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct MinWage {
    #[serde(rename = "Province")]
    pub province: String,
    #[serde(rename = "Minimum Wage")]
    pub minimum_wage: f64,
}

/// A wage joined with its province's All-items CPI.
#[derive(Clone, PartialEq, Debug)]
pub struct WageRow {
    pub province: String,
    pub cpi: f64,
    pub nominal: f64,
    /// (nominal / CPI) * 100
    pub real: f64,
    pub difference: f64,
}

/// Nominal extremes plus the CPI-adjusted comparison table.
#[derive(Clone, PartialEq, Debug)]
pub struct MinWageSummary {
    pub highest_nominal: MinWage,
    pub lowest_nominal: MinWage,
    pub highest_real: WageRow,
    pub rows: Vec<WageRow>,
}

/// Read MinimumWages.csv.
pub fn load_wages(path: &Path) -> Result<Vec<MinWage>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut wages = Vec::new();
    for record in reader.deserialize() {
        let wage: MinWage = record?;
        wages.push(wage);
    }
    info!("loaded {} minimum wage records", wages.len());
    Ok(wages)
}

/// Compare nominal and real (CPI-adjusted) minimum wages for one month.
/// Provinces without an All-items CPI reading that month are dropped from
/// the joined table (inner-join semantics), but still count for the nominal
/// extremes.
pub fn min_wage_summary(
    table: &CpiTable,
    wages: &[MinWage],
    month: &str,
) -> Result<MinWageSummary> {
    // ties resolve to the first wage-file row
    let highest_nominal = wages
        .iter()
        .cloned()
        .reduce(|best, next| {
            if next.minimum_wage > best.minimum_wage {
                next
            } else {
                best
            }
        })
        .ok_or_else(|| FinError::data("minimum wage file has no rows"))?;
    let lowest_nominal = wages
        .iter()
        .cloned()
        .reduce(|best, next| {
            if next.minimum_wage < best.minimum_wage {
                next
            } else {
                best
            }
        })
        .ok_or_else(|| FinError::data("minimum wage file has no rows"))?;

    let target = month_date(month)?;
    let rows: Vec<WageRow> = wages
        .iter()
        .filter_map(|wage| {
            table
                .observations()
                .iter()
                .find(|obs| {
                    obs.item == ALL_ITEMS
                        && obs.jurisdiction == wage.province
                        && obs.date == target
                })
                .map(|obs| {
                    let real = wage.minimum_wage / obs.cpi * 100.0;
                    WageRow {
                        province: wage.province.clone(),
                        cpi: obs.cpi,
                        nominal: wage.minimum_wage,
                        real,
                        difference: wage.minimum_wage - real,
                    }
                })
        })
        .collect();

    let highest_real = rows
        .iter()
        .cloned()
        .reduce(|best, next| if next.real > best.real { next } else { best })
        .ok_or_else(|| {
            FinError::data(format!(
                "no province in the wage file has All-items CPI for {month}"
            ))
        })?;

    Ok(MinWageSummary {
        highest_nominal,
        lowest_nominal,
        highest_real,
        rows,
    })
}
