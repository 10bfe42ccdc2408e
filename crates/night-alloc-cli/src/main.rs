// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{Local, NaiveDate};
use clap::Parser;
use night_alloc_model::problem::loader::ProblemLoader;
use night_alloc_model::problem::night::{NightDate, NightRange};
use night_alloc_model::problem::prob::Problem;
use night_alloc_model::problem::req::RequesterIdentifier;
use night_alloc_model::validation::SolutionValidator;
use night_alloc_solver::engine::solver::Solver;
use night_alloc_solver::engine::strategy::StrategyKind;
use night_alloc_solver::metrics::Metrics;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "night-alloc",
    version,
    about = "Assigns requesters to night slots from a CSV of preference requests"
)]
struct Args {
    /// Input CSV with requester_id, name, desired_nights, requested_dates
    /// and an optional priority column.
    #[arg(long)]
    csv: PathBuf,

    /// Assignment strategy: balanced, coverage or satisfaction.
    #[arg(long, default_value_t = StrategyKind::default())]
    strategy: StrategyKind,

    /// People required per night.
    #[arg(long, default_value_t = 1)]
    slots_per_night: u32,

    /// First night of an explicit scheduling window. Without a window the
    /// nights are derived from the requests themselves.
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last night of the scheduling window, inclusive.
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Seed for the satisfaction strategy's randomized tie-breaks.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the schedule and summary CSV outputs.
    #[arg(long, default_value = ".")]
    outdir: PathBuf,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

#[derive(Serialize)]
struct RunReport<'a> {
    strategy: &'a str,
    schedule: BTreeMap<String, Vec<String>>,
    metrics: &'a Metrics,
}

#[derive(Serialize)]
struct ScheduleRow<'a> {
    date: String,
    requester_id: &'a str,
    requester_name: &'a str,
}

fn write_csv_outputs(
    problem: &Problem,
    report: &RunReport<'_>,
    outdir: &Path,
) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(outdir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");

    let schedule_path = outdir.join(format!("night_schedule_{stamp}.csv"));
    let mut writer = csv::Writer::from_path(&schedule_path)?;
    for (date, ids) in &report.schedule {
        for id in ids {
            let name = problem
                .requester(&RequesterIdentifier::new(id.clone()))
                .map(|r| r.name())
                .unwrap_or("");
            writer.serialize(ScheduleRow {
                date: date.clone(),
                requester_id: id,
                requester_name: name,
            })?;
        }
    }
    writer.flush()?;
    tracing::info!(path = %schedule_path.display(), "wrote schedule CSV");

    let summary_path = outdir.join(format!("night_schedule_summary_{stamp}.csv"));
    let mut writer = csv::Writer::from_path(&summary_path)?;
    for stats in &report.metrics.requester_stats {
        writer.serialize(stats)?;
    }
    writer.flush()?;
    tracing::info!(path = %summary_path.display(), "wrote summary CSV");
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut loader = ProblemLoader::new().with_slots_per_night(args.slots_per_night);
    if let (Some(start), Some(end)) = (args.start, args.end) {
        let range = NightRange::new(NightDate::new(start), NightDate::new(end))?;
        loader = loader.with_night_range(range);
    }
    let problem = loader.from_path(&args.csv)?;

    let result = Solver::new(args.strategy).with_seed(args.seed).solve(&problem);
    SolutionValidator::new().validate(&problem, result.solution())?;

    let schedule: BTreeMap<String, Vec<String>> = result
        .solution()
        .iter()
        .map(|(night, ids)| {
            (
                night.to_string(),
                ids.iter().map(|id| id.as_str().to_string()).collect(),
            )
        })
        .collect();
    let report = RunReport {
        strategy: args.strategy.as_str(),
        schedule,
        metrics: result.metrics(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    write_csv_outputs(&problem, &report, &args.outdir)
}

fn main() {
    enable_tracing();
    let args = Args::parse();
    if let Err(err) = run(args) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
