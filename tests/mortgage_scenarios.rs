//! End-to-end scenarios across the engine and report layers.

use approx::assert_relative_eq;
use fincalc::cpi::{self, CpiConfig, ITEMS_OF_INTEREST};
use fincalc::mortgage::{MortgageTerms, PlanKind, ScheduleSet};
use fincalc::report;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn standard_five_year_term() {
    let terms = MortgageTerms::new(5.0, 25, 5).unwrap();
    assert_relative_eq!(terms.effective_annual_rate(), 0.050625, epsilon = 1e-9);

    let set = ScheduleSet::build(&terms, 300_000.0);
    assert_eq!(
        set.payments(),
        [1744.81, 871.51, 804.41, 402.01, 872.41, 436.20]
    );

    for (plan, schedule) in set.iter() {
        // term is far shorter than amortization, so every plan runs its full
        // term and leaves a balance outstanding
        assert_eq!(schedule.len() as u32, plan.term_periods);
        assert!(schedule.final_balance() > 0.0);

        for row in schedule.rows() {
            assert_relative_eq!(
                row.ending_balance,
                row.starting_balance + row.interest - row.payment,
                epsilon = 0.011
            );
        }
        for pair in schedule.rows().windows(2) {
            assert_relative_eq!(
                pair[1].starting_balance,
                pair[0].ending_balance,
                epsilon = 0.011
            );
        }
    }

    // rapid payments derive from the monthly payment
    let monthly = set.plan(PlanKind::Monthly).rounded_payment();
    assert_relative_eq!(
        set.plan(PlanKind::RapidBiWeekly).rounded_payment(),
        monthly / 2.0,
        epsilon = 0.01
    );
    assert_relative_eq!(
        set.plan(PlanKind::RapidWeekly).rounded_payment(),
        monthly / 4.0,
        epsilon = 0.01
    );
}

#[test]
fn zero_rate_full_amortization() {
    let terms = MortgageTerms::new(0.0, 1, 1).unwrap();
    let set = ScheduleSet::build(&terms, 10_000.0);

    assert_relative_eq!(
        set.plan(PlanKind::Monthly).payment_amount,
        10_000.0 / 12.0,
        epsilon = 1e-12
    );

    let schedule = set.schedule(PlanKind::Monthly);
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.final_balance(), 0.0);
}

#[test]
fn schedule_csv_export() {
    let terms = MortgageTerms::new(5.0, 25, 5).unwrap();
    let set = ScheduleSet::build(&terms, 300_000.0);
    let dir = TempDir::new().unwrap();

    let paths = report::write_schedule_csvs(&set, &dir.path().join("out")).unwrap();
    assert_eq!(paths.len(), 6);
    for (path, (plan, schedule)) in paths.iter().zip(set.iter()) {
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), schedule.len() + 1);
        assert!(contents.starts_with("Period,Starting Balance"));
        assert!(path.file_name().is_some(), "missing file for {}", plan.kind);
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn cpi_analysis_end_to_end() {
    let dir = TempDir::new().unwrap();
    for (jur, base) in [("Canada", 160.0), ("ON", 162.0), ("AB", 155.0)] {
        write_file(
            dir.path(),
            &format!("{jur}.CPI.1810000401.csv"),
            &format!(
                "Item,24-Nov,24-Dec\n\
                 All-items,{b:.1},{b2:.1}\n\
                 Food,170.0,171.7\n\
                 Shelter,180.0,181.8\n\
                 All-items excluding food and energy,150.0,150.9\n\
                 Services,155.0,157.0\n",
                b = base,
                b2 = base + 1.0
            ),
        );
    }
    write_file(
        dir.path(),
        "MinimumWages.csv",
        "Province,Minimum Wage\nON,17.20\nAB,15.00\n",
    );

    let config = CpiConfig {
        cpi_files: vec![
            dir.path().join("Canada.CPI.1810000401.csv"),
            dir.path().join("ON.CPI.1810000401.csv"),
            dir.path().join("AB.CPI.1810000401.csv"),
        ],
        wages_file: dir.path().join("MinimumWages.csv"),
    };

    let table = cpi::load(&config).unwrap();
    assert_eq!(table.len(), 3 * 5 * 2);

    let changes = table.avg_monthly_changes(&ITEMS_OF_INTEREST);
    assert_eq!(changes.len(), 9);

    let salaries = table.equivalent_salaries(100_000.0, "ON", "Dec-24").unwrap();
    assert_eq!(salaries.len(), 1);
    assert_eq!(salaries[0].jurisdiction, "AB");
    assert_relative_eq!(
        salaries[0].salary,
        100_000.0 * 156.0 / 163.0,
        epsilon = 0.01
    );

    let wages = cpi::wages::load_wages(&config.wages_file).unwrap();
    let summary = cpi::min_wage_summary(&table, &wages, "Dec-24").unwrap();
    assert_eq!(summary.highest_nominal.province, "ON");
    assert_eq!(summary.rows.len(), 2);

    let services = table.services_inflation();
    assert_eq!(services.len(), 3);
    // identical Services series means a three-way tie; reduce keeps the first
    let top = table.top_services_inflation().unwrap();
    assert_eq!(top.jurisdiction, "AB");

    let out = dir.path().join("reports");
    let paths =
        report::write_cpi_csvs(&out, &changes, &[], &salaries, &summary, &services).unwrap();
    assert_eq!(paths.len(), 5);
    for path in paths {
        assert!(path.exists());
    }
}
