use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fincalc::cpi::{self, CpiConfig, ITEMS_OF_INTEREST};
use fincalc::mortgage::{MortgageTerms, ScheduleSet};
use fincalc::report;
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(name = "fincalc", about = "Mortgage schedules and CPI analysis")]
struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute payment options and amortization schedules for a mortgage
    Mortgage {
        /// Principal amount ($)
        #[arg(long)]
        principal: f64,
        /// Annual quoted interest rate (%), compounded semi-annually
        #[arg(long)]
        rate: f64,
        /// Amortization period (years)
        #[arg(long)]
        amort_years: u32,
        /// Term of the mortgage (years)
        #[arg(long)]
        term_years: u32,
        /// Directory for the six schedule CSVs
        #[arg(long, default_value = "schedules")]
        out_dir: PathBuf,
    },
    /// Analyze CPI data and minimum wages across jurisdictions
    Cpi {
        /// Directory holding the CPI CSVs and MinimumWages.csv
        #[arg(long)]
        data_dir: PathBuf,
        /// Reference salary for the equivalent-salary comparison
        #[arg(long, default_value_t = 100_000.0)]
        salary: f64,
        /// Base jurisdiction for the equivalent-salary comparison
        #[arg(long, default_value = "ON")]
        base: String,
        /// Month used for salary and wage comparisons (e.g. Dec-24)
        #[arg(long, default_value = "Dec-24")]
        month: String,
        /// Optional directory for CSV exports of each analysis
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()
        .context("logger init failed")?;

    match cli.command {
        Command::Mortgage {
            principal,
            rate,
            amort_years,
            term_years,
            out_dir,
        } => run_mortgage(principal, rate, amort_years, term_years, out_dir),
        Command::Cpi {
            data_dir,
            salary,
            base,
            month,
            out_dir,
        } => run_cpi(data_dir, salary, &base, &month, out_dir),
    }
}

fn run_mortgage(
    principal: f64,
    rate: f64,
    amort_years: u32,
    term_years: u32,
    out_dir: PathBuf,
) -> anyhow::Result<()> {
    let terms = MortgageTerms::new(rate, amort_years, term_years)?;
    let set = ScheduleSet::build(&terms, principal);

    report::print_payment_options(&set);
    let paths = report::write_schedule_csvs(&set, &out_dir)?;
    println!(
        "\nAll {} mortgage schedules have been saved to: {}",
        paths.len(),
        out_dir.display()
    );
    Ok(())
}

fn run_cpi(
    data_dir: PathBuf,
    salary: f64,
    base: &str,
    month: &str,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = CpiConfig::statcan_dir(&data_dir);
    let table = cpi::load(&config)
        .with_context(|| format!("loading CPI data from {}", data_dir.display()))?;

    report::print_cpi_head(&table, 12);

    let changes = table.avg_monthly_changes(&ITEMS_OF_INTEREST);
    report::print_avg_changes(&changes);

    let top = table.provinces_with_highest_change(&ITEMS_OF_INTEREST);
    report::print_top_provinces(&top);

    let salaries = table.equivalent_salaries(salary, base, month)?;
    report::print_equivalent_salaries(base, month, salary, &salaries);

    let wages = cpi::wages::load_wages(&config.wages_file)?;
    let summary = cpi::min_wage_summary(&table, &wages, month)?;
    report::print_min_wages(&summary, month);

    let services = table.services_inflation();
    report::print_services_inflation(&services, table.top_services_inflation().as_ref());

    if let Some(dir) = out_dir {
        let paths = report::write_cpi_csvs(&dir, &changes, &top, &salaries, &summary, &services)?;
        println!(
            "\nAll {} analysis tables have been saved to: {}",
            paths.len(),
            dir.display()
        );
    }
    Ok(())
}
