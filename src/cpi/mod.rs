//! Consumer Price Index analysis over Statistics Canada style CSV extracts.

pub mod analysis;
pub mod loader;
pub mod wages;

pub use analysis::{AvgChange, EquivalentSalary, ServicesInflation, TopProvinces, ITEMS_OF_INTEREST};
pub use loader::{load, CpiObservation, CpiTable};
pub use wages::{min_wage_summary, MinWage, MinWageSummary, WageRow};

use std::path::{Path, PathBuf};

/// Explicit input-file configuration, passed to the loader instead of
/// module-level path globals.
#[derive(Clone, Debug)]
pub struct CpiConfig {
    pub cpi_files: Vec<PathBuf>,
    pub wages_file: PathBuf,
}

impl CpiConfig {
    /// Canada plus the ten provinces, in file order.
    pub const JURISDICTIONS: [&'static str; 11] = [
        "Canada", "AB", "BC", "MB", "NB", "NL", "NS", "ON", "PEI", "QC", "SK",
    ];

    /// Standard layout of a Statistics Canada table 18-10-0004-01 download:
    /// one `<JUR>.CPI.1810000401.csv` per jurisdiction plus
    /// `MinimumWages.csv`, all in one directory.
    pub fn statcan_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            cpi_files: Self::JURISDICTIONS
                .iter()
                .map(|jur| dir.join(format!("{jur}.CPI.1810000401.csv")))
                .collect(),
            wages_file: dir.join("MinimumWages.csv"),
        }
    }
}
