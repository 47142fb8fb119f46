//! Reads wide CPI CSV files and melts them into one long table.
//!
//! Each input file has an `Item` column followed by one column per month.
//! The jurisdiction is taken from the file-name stem (`ON.CPI....csv` -> ON).

use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use super::CpiConfig;
use crate::error::{FinError, Result};

/// One (item, month, jurisdiction) CPI reading.
#[derive(Clone, PartialEq, Debug)]
pub struct CpiObservation {
    pub item: String,
    pub month: String,
    pub jurisdiction: String,
    pub cpi: f64,
    pub date: NaiveDate,
}

/// The combined long-format table across all jurisdictions.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CpiTable {
    observations: Vec<CpiObservation>,
}

impl CpiTable {
    pub fn observations(&self) -> &[CpiObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First `n` rows of the combined table, for previewing.
    pub fn head(&self, n: usize) -> &[CpiObservation] {
        &self.observations[..n.min(self.observations.len())]
    }
}

/// Load and combine every CPI file named by the configuration.
pub fn load(config: &CpiConfig) -> Result<CpiTable> {
    let mut observations = Vec::new();
    for path in &config.cpi_files {
        load_file(path, &mut observations)?;
    }
    info!(
        "loaded {} CPI observations from {} files",
        observations.len(),
        config.cpi_files.len()
    );
    Ok(CpiTable { observations })
}

fn load_file(path: &Path, out: &mut Vec<CpiObservation>) -> Result<()> {
    let jurisdiction = jurisdiction_from_path(path)?;
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(FinError::data(format!("{}: no header row", path.display())));
    }
    let months: Vec<String> = headers.iter().skip(1).map(normalize_month).collect();
    let dates = months
        .iter()
        .map(|m| month_date(m))
        .collect::<Result<Vec<_>>>()?;

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let items = records
        .iter()
        .map(|record| {
            record
                .get(0)
                .map(|item| item.trim().to_string())
                .ok_or_else(|| FinError::data(format!("{}: empty record", path.display())))
        })
        .collect::<Result<Vec<_>>>()?;

    // melt column-major: every item for the first month, then the next
    // month, so the head of the combined table previews one month across
    // all items
    let before = out.len();
    for (idx, (month, date)) in months.iter().zip(&dates).enumerate() {
        for (record, item) in records.iter().zip(&items) {
            let raw = record.get(idx + 1).unwrap_or("").trim();
            let cpi: f64 = raw.parse().map_err(|_| {
                FinError::data(format!(
                    "{}: bad CPI value '{raw}' for {item} / {month}",
                    path.display()
                ))
            })?;
            out.push(CpiObservation {
                item: item.clone(),
                month: month.clone(),
                jurisdiction: jurisdiction.clone(),
                cpi,
                date: *date,
            });
        }
    }
    debug!(
        "{}: {} observations for {jurisdiction}",
        path.display(),
        out.len() - before
    );
    Ok(())
}

/// Some extracts label columns year-first ("24-Jan"); flip those to the
/// month-first form ("Jan-24") used everywhere downstream.
fn normalize_month(label: &str) -> String {
    let label = label.trim();
    match label.split_once('-') {
        Some((year, month)) if year.chars().all(|c| c.is_ascii_digit()) => {
            format!("{month}-{year}")
        }
        _ => label.to_string(),
    }
}

/// Parse a "Jan-24" style label as the first of that month.
pub(crate) fn month_date(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01-{month}"), "%d-%b-%y")
        .map_err(|e| FinError::data(format!("unparseable month label '{month}': {e}")))
}

fn jurisdiction_from_path(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            FinError::data(format!(
                "cannot derive jurisdiction from file name {}",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::{jurisdiction_from_path, load, month_date, normalize_month};
    use crate::cpi::CpiConfig;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use test_log::test;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("24-Jan"), "Jan-24");
        assert_eq!(normalize_month("Jan-24"), "Jan-24");
        assert_eq!(normalize_month(" 24-Dec "), "Dec-24");
    }

    #[test]
    fn test_month_date() {
        assert_eq!(
            month_date("Dec-24").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
        );
        assert!(month_date("nonsense").is_err());
    }

    #[test]
    fn test_jurisdiction_from_path() {
        assert_eq!(
            jurisdiction_from_path(Path::new("/data/ON.CPI.1810000401.csv")).unwrap(),
            "ON"
        );
        assert_eq!(
            jurisdiction_from_path(Path::new("Canada.CPI.1810000401.csv")).unwrap(),
            "Canada"
        );
    }

    #[test]
    fn test_load_melts_wide_files() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "Canada.CPI.1810000401.csv",
            "Item,24-Jan,24-Feb\nAll-items,160.0,161.6\nFood,170.0,171.7\n",
        );
        write_file(
            dir.path(),
            "ON.CPI.1810000401.csv",
            "Item,24-Jan,24-Feb\nAll-items,162.0,163.0\nFood,171.0,172.0\n",
        );

        let config = CpiConfig {
            cpi_files: vec![
                dir.path().join("Canada.CPI.1810000401.csv"),
                dir.path().join("ON.CPI.1810000401.csv"),
            ],
            wages_file: dir.path().join("MinimumWages.csv"),
        };
        let table = load(&config).unwrap();

        assert_eq!(table.len(), 8);
        let first = &table.observations()[0];
        assert_eq!(first.item, "All-items");
        assert_eq!(first.month, "Jan-24");
        assert_eq!(first.jurisdiction, "Canada");
        assert_eq!(first.cpi, 160.0);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(table.head(3).len(), 3);
        assert!(table
            .observations()
            .iter()
            .any(|o| o.jurisdiction == "ON" && o.month == "Feb-24" && o.cpi == 163.0));
    }

    #[test]
    fn test_head_previews_first_month_across_items() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "MB.CPI.1810000401.csv",
            "Item,24-Jan,24-Feb\nFood,170.0,171.7\nShelter,180.0,181.8\n",
        );
        let config = CpiConfig {
            cpi_files: vec![dir.path().join("MB.CPI.1810000401.csv")],
            wages_file: dir.path().join("MinimumWages.csv"),
        };
        let table = load(&config).unwrap();

        // every item for Jan-24 comes before anything from Feb-24
        let order: Vec<(&str, &str)> = table
            .observations()
            .iter()
            .map(|o| (o.item.as_str(), o.month.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Food", "Jan-24"),
                ("Shelter", "Jan-24"),
                ("Food", "Feb-24"),
                ("Shelter", "Feb-24"),
            ]
        );
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "AB.CPI.1810000401.csv",
            "Item,24-Jan\nAll-items,not-a-number\n",
        );
        let config = CpiConfig {
            cpi_files: vec![dir.path().join("AB.CPI.1810000401.csv")],
            wages_file: dir.path().join("MinimumWages.csv"),
        };
        assert!(load(&config).is_err());
    }
}
