//! daytally - activity log dashboard
//!
//! Reads an activity export (CSV) and prints per-period summaries, daily
//! category matrices and category rankings.

mod load;
mod repair;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use daytally_core::analytics::{CategoryCatalog, DailyMatrix, PeriodView, ViewOptions};
use daytally_core::fingerprint::{dataset_fingerprint, view_key};
use daytally_core::format::format_hours_short;
use daytally_core::{
    parse_date, split_records, Config, NavigationState, PeriodKind, PeriodWindow, SegmentSet,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "daytally")]
#[command(about = "Summarize an activity log by day, week, month or year")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary block for one period
    Summary {
        /// Activity export (CSV)
        file: PathBuf,

        #[command(flatten)]
        nav: NavArgs,

        /// Category to leave out of the summary (overrides config)
        #[arg(long)]
        hide: Option<String>,

        /// Ignore the configured hidden category
        #[arg(long, conflicts_with = "hide")]
        show_all: bool,

        /// Output format (text, json, md)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the daily category matrix for one period
    Matrix {
        /// Activity export (CSV)
        file: PathBuf,

        #[command(flatten)]
        nav: NavArgs,

        /// Print every date in the data instead of one period
        #[arg(long)]
        all: bool,

        /// Output format (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// List categories ranked by total time
    Categories {
        /// Activity export (CSV)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite an export whose notes contain unquoted commas
    FixCsv {
        /// Malformed export
        input: PathBuf,

        /// Where to write the repaired file
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct NavArgs {
    /// Period kind (day, week, month, year; default from config)
    #[arg(long, short)]
    period: Option<String>,

    /// Anchor date (YYYY-MM-DD; default is the latest date in the data)
    #[arg(long, short)]
    date: Option<String>,

    /// Periods to move from the anchor (negative moves back)
    #[arg(long, short, default_value_t = 0, allow_negative_numbers = true)]
    shift: i64,
}

/// One loaded export with everything derived once per load.
struct Session {
    fingerprint: String,
    set: SegmentSet,
    catalog: CategoryCatalog,
    nav: NavigationState,
}

impl Session {
    fn load(path: &Path) -> Result<Self> {
        let loaded = load::load_csv(path)?;
        if loaded.skipped > 0 {
            eprintln!(
                "Warning: skipped {} unusable row{} in {}",
                loaded.skipped,
                if loaded.skipped == 1 { "" } else { "s" },
                path.display()
            );
        }

        let fingerprint = dataset_fingerprint(&loaded.records);
        let set = split_records(&loaded.records, loaded.detail);
        let catalog = CategoryCatalog::from_segments(&set.segments);
        let nav = NavigationState::for_segments(&set, Local::now().date_naive());

        tracing::debug!(
            dataset = %fingerprint,
            segments = set.len(),
            categories = catalog.len(),
            "Session ready"
        );

        Ok(Self {
            fingerprint,
            set,
            catalog,
            nav,
        })
    }

    /// Resolve the period kind and move its anchor as requested.
    fn navigate(&mut self, args: &NavArgs, config: &Config) -> Result<PeriodKind> {
        let kind = match &args.period {
            Some(period) => period.parse::<PeriodKind>()?,
            None => config.dashboard.period()?,
        };
        if let Some(date) = &args.date {
            let date = parse_date(date).context("invalid --date")?;
            self.nav.jump_to(kind, date);
        }
        self.nav
            .shift_by(kind, args.shift)
            .with_context(|| format!("cannot move the {} view by {}", kind, args.shift))?;
        Ok(kind)
    }
}

/// JSON form of the summary command.
#[derive(Serialize)]
struct SummaryReport<'a> {
    period: PeriodKind,
    label: &'a str,
    window: PeriodWindow,
    total_hours: f64,
    legend: &'a [String],
    summary: &'a str,
    view_key: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = daytally_core::logging::init(&config.logging).ok();

    match cli.command {
        Command::Summary {
            file,
            nav,
            hide,
            show_all,
            format,
        } => {
            let mut session = Session::load(&file)?;
            let kind = session.navigate(&nav, &config)?;

            let mut options = config.view_options();
            if show_all {
                options.hidden_category = None;
            } else if hide.is_some() {
                options.hidden_category = hide;
            }

            let view = PeriodView::compute(
                &session.set,
                &session.catalog,
                &session.nav,
                kind,
                &options,
            );

            match format.as_str() {
                "text" => print_summary_text(&view),
                "md" => print_summary_markdown(&view),
                "json" => {
                    let report = SummaryReport {
                        period: kind,
                        label: &view.label,
                        window: view.window,
                        total_hours: view.slice.total_hours,
                        legend: &view.legend,
                        summary: &view.summary,
                        view_key: view_key(
                            &session.fingerprint,
                            kind,
                            session.nav.anchor(kind),
                            options.hidden_category.as_deref(),
                        ),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                other => anyhow::bail!("Unknown format: {}. Use 'text', 'json' or 'md'", other),
            }
        }

        Command::Matrix {
            file,
            nav,
            all,
            format,
        } => {
            let mut session = Session::load(&file)?;
            let matrix = if all {
                DailyMatrix::from_segments(&session.set.segments, &session.catalog)
            } else {
                let kind = session.navigate(&nav, &config)?;
                let view = PeriodView::compute(
                    &session.set,
                    &session.catalog,
                    &session.nav,
                    kind,
                    &ViewOptions::default(),
                );
                view.chart_matrix(&session.catalog)
            };

            match format.as_str() {
                "csv" => print_matrix_csv(&matrix)?,
                "json" => println!("{}", serde_json::to_string_pretty(&matrix)?),
                other => anyhow::bail!("Unknown format: {}. Use 'csv' or 'json'", other),
            }
        }

        Command::Categories { file, json } => {
            let session = Session::load(&file)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(session.catalog.totals())?
                );
            } else if session.catalog.is_empty() {
                println!("No activity found.");
            } else {
                for (rank, total) in session.catalog.totals().iter().enumerate() {
                    println!(
                        "{:>3}. {:<24} {:>10}",
                        rank + 1,
                        total.category,
                        format_hours_short(total.hours)
                    );
                }
            }
        }

        Command::FixCsv { input, output } => {
            if input == output {
                anyhow::bail!("Refusing to overwrite the input file; choose another output path");
            }
            let stats = repair::repair_file(&input, &output)?;
            println!(
                "Wrote {} ({} rows, {} repaired)",
                output.display(),
                stats.rows,
                stats.repaired
            );
        }
    }

    Ok(())
}

fn print_summary_text(view: &PeriodView) {
    println!("{} ({})", view.label, view.window);
    println!("Total: {}", format_hours_short(view.slice.total_hours));
    println!();
    if view.summary.is_empty() {
        println!("No activity in this period.");
    } else {
        println!("{}", view.summary);
    }
}

fn print_summary_markdown(view: &PeriodView) {
    println!("## {}", view.label);
    println!();
    println!(
        "_{}_ · total {}",
        view.window,
        format_hours_short(view.slice.total_hours)
    );
    println!();
    if view.summary.is_empty() {
        println!("No activity in this period.");
    } else {
        println!("```");
        println!("{}", view.summary);
        println!("```");
    }
}

fn print_matrix_csv(matrix: &DailyMatrix) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());

    let mut header = vec!["date".to_string()];
    header.extend(matrix.categories.iter().cloned());
    wtr.write_record(&header)?;

    for row in &matrix.rows {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(row.hours.iter().map(|h| h.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
