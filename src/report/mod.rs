//! Console summaries and CSV report artifacts.
//!
//! The engine hands over `ScheduleSet` / CPI analysis values; everything in
//! here is presentation. Exported CSVs carry the same column sets as the
//! original worksheets (Period, Starting Balance, Interest Amount, Payment,
//! Ending Balance for schedules).

use std::path::{Path, PathBuf};

use log::info;

use crate::cpi::{
    AvgChange, CpiTable, EquivalentSalary, MinWageSummary, ServicesInflation, TopProvinces,
};
use crate::error::Result;
use crate::mortgage::{PlanKind, Schedule, ScheduleSet};

/// Format a money amount with thousands separators, e.g. `$1,744.81`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let dollars = (cents.abs() / 100).to_string();
    let rem = cents.abs() % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{rem:02}")
}

const SCHEDULE_HEADERS: [&str; 5] = [
    "Period",
    "Starting Balance",
    "Interest Amount",
    "Payment",
    "Ending Balance",
];

/// Print the six payment amounts, one line per plan in fixed order.
pub fn print_payment_options(set: &ScheduleSet) {
    println!("\nMortgage Payment Options");
    println!("------------------------");
    for (plan, _) in set.iter() {
        println!("{:>18}: {}", plan.kind.to_string(), format_money(plan.rounded_payment()));
    }
}

/// Print one plan's full amortization table.
pub fn print_schedule(set: &ScheduleSet, kind: PlanKind) {
    println!("\n{} schedule", kind);
    for row in set.schedule(kind).rows() {
        println!("{}", row);
    }
}

fn schedule_file_name(kind: PlanKind) -> String {
    let slug = kind
        .to_string()
        .to_lowercase()
        .replace([' ', '-'], "_")
        .replace("__", "_");
    format!("{slug}_payments.csv")
}

fn write_schedule_csv(schedule: &Schedule, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(SCHEDULE_HEADERS)?;
    for row in schedule.rows() {
        writer.write_record([
            row.period.to_string(),
            format!("{:.2}", row.starting_balance),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.ending_balance),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one CSV per plan into `dir` (created if missing); returns the
/// written paths in fixed plan order.
pub fn write_schedule_csvs(set: &ScheduleSet, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(PlanKind::ALL.len());
    for (plan, schedule) in set.iter() {
        let path = dir.join(schedule_file_name(plan.kind));
        write_schedule_csv(schedule, &path)?;
        info!("wrote {} rows to {}", schedule.len(), path.display());
        paths.push(path);
    }
    Ok(paths)
}

/// Preview of the combined CPI table.
pub fn print_cpi_head(table: &CpiTable, n: usize) {
    println!("\nFirst {n} rows of the combined CPI table:");
    println!("{:<40} {:>8} {:>14} {:>8}", "Item", "Month", "Jurisdiction", "CPI");
    for obs in table.head(n) {
        println!(
            "{:<40} {:>8} {:>14} {:>8.1}",
            obs.item, obs.month, obs.jurisdiction, obs.cpi
        );
    }
}

pub fn print_avg_changes(changes: &[AvgChange]) {
    println!("\nAverage month-to-month change by jurisdiction and item:");
    for change in changes {
        println!(
            "{:>14} | {:<40} {:>6.1}%",
            change.jurisdiction, change.item, change.avg_pct
        );
    }
}

pub fn print_top_provinces(top: &[TopProvinces]) {
    println!("\nProvince(s) with the highest average change per item:");
    for entry in top {
        println!(
            "{}: {} - {:.1}%",
            entry.item,
            entry.jurisdictions.join(", "),
            entry.avg_pct
        );
    }
}

pub fn print_equivalent_salaries(
    base: &str,
    month: &str,
    salary: f64,
    rows: &[EquivalentSalary],
) {
    println!(
        "\nEquivalent salary to {} received in {base} ({month}):",
        format_money(salary)
    );
    for row in rows {
        println!(
            "{:>14}: CPI {:>6.1}, equivalent {}",
            row.jurisdiction,
            row.cpi,
            format_money(row.salary)
        );
    }
}

pub fn print_min_wages(summary: &MinWageSummary, month: &str) {
    println!("\nMinimum wage comparison ({month}):");
    println!(
        "Highest nominal: {} at {}",
        summary.highest_nominal.province,
        format_money(summary.highest_nominal.minimum_wage)
    );
    println!(
        "Lowest nominal: {} at {}",
        summary.lowest_nominal.province,
        format_money(summary.lowest_nominal.minimum_wage)
    );
    println!(
        "Highest real (CPI-adjusted): {} at {}",
        summary.highest_real.province,
        format_money(summary.highest_real.real)
    );
    println!(
        "{:>14} {:>8} {:>10} {:>10} {:>10}",
        "Province", "CPI", "Nominal", "Real", "Diff"
    );
    for row in &summary.rows {
        println!(
            "{:>14} {:>8.1} {:>10} {:>10} {:>10}",
            row.province,
            row.cpi,
            format_money(row.nominal),
            format_money(row.real),
            format_money(row.difference)
        );
    }
}

pub fn print_services_inflation(rows: &[ServicesInflation], top: Option<&ServicesInflation>) {
    println!("\nAnnual change in Services CPI (first vs. last month):");
    for row in rows {
        println!("{:>14}: {:.1}%", row.jurisdiction, row.annual_pct);
    }
    if let Some(top) = top {
        println!(
            "Region with the highest Services inflation: {} at {:.1}%",
            top.jurisdiction, top.annual_pct
        );
    }
}

fn write_table_csv<I>(path: &Path, headers: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export every CPI analysis as its own CSV in `dir`; returns written paths.
pub fn write_cpi_csvs(
    dir: &Path,
    changes: &[AvgChange],
    top: &[TopProvinces],
    salaries: &[EquivalentSalary],
    wages: &MinWageSummary,
    services: &[ServicesInflation],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut paths = Vec::new();

    let path = dir.join("avg_monthly_change.csv");
    write_table_csv(
        &path,
        &["Jurisdiction", "Item", "Avg Monthly Change (%)"],
        changes.iter().map(|c| {
            vec![
                c.jurisdiction.clone(),
                c.item.clone(),
                format!("{:.4}", c.avg_pct),
            ]
        }),
    )?;
    paths.push(path);

    let path = dir.join("top_provinces.csv");
    write_table_csv(
        &path,
        &["Item", "Province(s)", "Avg Monthly Change (%)"],
        top.iter().map(|t| {
            vec![
                t.item.clone(),
                t.jurisdictions.join(", "),
                format!("{:.1}", t.avg_pct),
            ]
        }),
    )?;
    paths.push(path);

    let path = dir.join("equivalent_salary.csv");
    write_table_csv(
        &path,
        &["Jurisdiction", "CPI", "Equivalent Salary"],
        salaries.iter().map(|s| {
            vec![
                s.jurisdiction.clone(),
                format!("{:.1}", s.cpi),
                format!("{:.2}", s.salary),
            ]
        }),
    )?;
    paths.push(path);

    let path = dir.join("min_wages.csv");
    write_table_csv(
        &path,
        &["Province", "CPI", "Minimum Wage", "Real Minimum Wage", "Difference"],
        wages.rows.iter().map(|r| {
            vec![
                r.province.clone(),
                format!("{:.1}", r.cpi),
                format!("{:.2}", r.nominal),
                format!("{:.2}", r.real),
                format!("{:.2}", r.difference),
            ]
        }),
    )?;
    paths.push(path);

    let path = dir.join("services_inflation.csv");
    write_table_csv(
        &path,
        &["Jurisdiction", "First", "Last", "Annual Change (%)"],
        services.iter().map(|s| {
            vec![
                s.jurisdiction.clone(),
                format!("{:.1}", s.first),
                format!("{:.1}", s.last),
                format!("{:.1}", s.annual_pct),
            ]
        }),
    )?;
    paths.push(path);

    info!("wrote {} CPI report files to {}", paths.len(), dir.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::{format_money, schedule_file_name, write_schedule_csvs};
    use crate::mortgage::{MortgageTerms, PlanKind, ScheduleSet};
    use tempfile::TempDir;
    use test_log::test;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1744.81), "$1,744.81");
        assert_eq!(format_money(300000.0), "$300,000.00");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.999), "$1,000.00");
        assert_eq!(format_money(-1234.5), "-$1,234.50");
        assert_eq!(format_money(42.0), "$42.00");
    }

    #[test]
    fn test_schedule_file_names() {
        assert_eq!(schedule_file_name(PlanKind::Monthly), "monthly_payments.csv");
        assert_eq!(
            schedule_file_name(PlanKind::SemiMonthly),
            "semi_monthly_payments.csv"
        );
        assert_eq!(
            schedule_file_name(PlanKind::RapidBiWeekly),
            "rapid_bi_weekly_payments.csv"
        );
    }

    #[test]
    fn test_write_schedule_csvs() {
        let terms = MortgageTerms::new(5.0, 25, 5).unwrap();
        let set = ScheduleSet::build(&terms, 300_000.0);
        let dir = TempDir::new().unwrap();

        let paths = write_schedule_csvs(&set, dir.path()).unwrap();
        assert_eq!(paths.len(), 6);

        let monthly = std::fs::read_to_string(&paths[0]).unwrap();
        let mut lines = monthly.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Period,Starting Balance,Interest Amount,Payment,Ending Balance"
        );
        assert_eq!(lines.next().unwrap(), "1,300000.00,1237.17,1744.81,299492.36");
        // header plus the 60-period term
        assert_eq!(monthly.lines().count(), 61);
    }
}
