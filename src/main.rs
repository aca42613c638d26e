mod error;
mod grid;
mod loader;
mod parser;
mod schedule;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use parser::ScheduleBuilder;
use schedule::{format_merged_day, Schedule};

#[derive(Parser)]
#[command(name = "timetable", about = "Class schedule extractor: xlsx timetables to calendar days")]
struct Cli {
    /// Directory with the source .xlsx files
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: PathBuf,
    /// Year the block start dates belong to (default: current year)
    #[arg(short, long, global = true)]
    year: Option<i32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose and print the full schedule
    Show,
    /// Print one day
    Day {
        /// Date as dd.mm.yyyy
        date: String,
    },
    /// Classes for today
    Today,
    /// List the schedule days of a month
    Month {
        /// Month number 1-12
        month: u32,
    },
    /// Emit the composed schedule as JSON
    Export,
    /// Source and schedule counters
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Show => {
            let schedule = compose(&cli)?;
            if schedule.is_empty() {
                println!(
                    "Schedule is empty. Put .xlsx files into {}.",
                    cli.data_dir.display()
                );
                return Ok(());
            }
            for day in schedule.all() {
                println!("{}", format_merged_day(day));
            }
        }
        Commands::Day { date } => {
            let date = NaiveDate::parse_from_str(date, "%d.%m.%Y")
                .context("expected date as dd.mm.yyyy")?;
            let schedule = compose(&cli)?;
            print_day(&schedule, date);
        }
        Commands::Today => {
            let schedule = compose(&cli)?;
            print_day(&schedule, Local::now().date_naive());
        }
        Commands::Month { month } => {
            anyhow::ensure!((1..=12).contains(month), "month must be 1-12");
            let schedule = compose(&cli)?;
            let year = cli.year.unwrap_or_else(|| Local::now().year());
            let days = schedule.for_month(year, *month);
            if days.is_empty() {
                println!("No schedule days in {:02}.{}.", month, year);
                return Ok(());
            }
            for day in days {
                let filled = day.slots.iter().filter(|s| !s.is_empty()).count();
                println!(
                    "{}  {:<12} {} classes",
                    day.date.format("%d.%m"),
                    day.name,
                    filled
                );
            }
        }
        Commands::Export => {
            let schedule = compose(&cli)?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Commands::Stats => {
            let grids = loader::load_all(&cli.data_dir)?;
            let sources = grids.len();
            let schedule = builder(&cli, grids).compose()?;

            let total_slots: usize = schedule.all().iter().map(|d| d.slots.len()).sum();
            let filled_slots: usize = schedule
                .all()
                .iter()
                .flat_map(|d| &d.slots)
                .filter(|s| !s.is_empty())
                .count();

            println!("Sources: {}", sources);
            println!("Days:    {}", schedule.len());
            if let (Some(first), Some(last)) = (schedule.all().first(), schedule.all().last()) {
                println!(
                    "Span:    {} - {}",
                    first.date.format("%d.%m.%y"),
                    last.date.format("%d.%m.%y")
                );
            }
            println!("Slots:   {} ({} filled)", total_slots, filled_slots);
        }
    }

    Ok(())
}

fn compose(cli: &Cli) -> Result<Schedule> {
    let grids = loader::load_all(&cli.data_dir)
        .with_context(|| format!("failed to load schedules from {}", cli.data_dir.display()))?;
    Ok(builder(cli, grids).compose()?)
}

fn builder(cli: &Cli, grids: Vec<grid::Grid>) -> ScheduleBuilder {
    let mut builder = ScheduleBuilder::new(grids);
    if let Some(year) = cli.year {
        builder = builder.year(year);
    }
    builder
}

fn print_day(schedule: &Schedule, date: NaiveDate) {
    match schedule.for_date(date) {
        Some(day) => println!("{}", format_merged_day(day)),
        None => println!("No classes recorded for {}.", date.format("%d.%m.%y")),
    }
}
