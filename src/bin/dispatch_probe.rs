use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use dispatch_dp::dispatch::{Dispatch, DispatchProblem, DispatchTables, Fleet};
use dispatch_dp::LayerEngineBuilder;
use serde::Serialize;
use tracing::info;

/// Fill the economic dispatch tables for a unit file and report commitments.
///
/// The unit file holds one unit per line as `a b c pu pl` (cost = a·x² + b·x + c),
/// separated by whitespace. Blank lines and lines starting with `#` are skipped.
#[derive(Parser)]
#[command(name = "dispatch_probe", version)]
struct Cli {
    /// Unit data file
    file: PathBuf,
    /// Demand levels to report (MW); may be repeated
    #[arg(short, long = "demand")]
    demands: Vec<usize>,
    /// Number of evenly spaced demand samples between p_min and p_max when no
    /// demand is given
    #[arg(short, long, default_value_t = 5)]
    samples: usize,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Minimum cells per parallel task (only with the `parallel` feature)
    #[arg(long)]
    min_chunk: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Serialize)]
struct Report {
    units: usize,
    p_min: usize,
    p_max: usize,
    fill_seconds: f64,
    dispatches: Vec<Dispatch>,
    unreachable: Vec<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("dispatch_probe: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = fs::read_to_string(&cli.file)
        .map_err(|e| format!("cannot read {}: {e}", cli.file.display()))?;
    let fleet = parse_fleet(&source)?;
    info!(
        units = fleet.len(),
        p_min = fleet.p_min(),
        p_max = fleet.p_max(),
        "fleet loaded"
    );

    let mut builder = LayerEngineBuilder::new(DispatchProblem::new(&fleet));
    if let Some(chunk) = cli.min_chunk {
        if chunk == 0 {
            return Err("--min-chunk must be positive".to_string());
        }
        builder = builder.with_min_chunk(chunk);
    }
    let engine = builder.build();

    let start = Instant::now();
    let tables = DispatchTables::solve_with(&engine);
    let fill_seconds = start.elapsed().as_secs_f64();
    info!(fill_seconds, "dispatch tables filled");

    let demands = if cli.demands.is_empty() {
        sample_demands(fleet.p_min(), fleet.p_max(), cli.samples)
    } else {
        cli.demands.clone()
    };

    let mut dispatches = Vec::new();
    let mut unreachable = Vec::new();
    for demand in demands {
        match tables.dispatch(demand).map_err(|e| e.to_string())? {
            Some(d) => dispatches.push(d),
            None => unreachable.push(demand),
        }
    }

    let report = Report {
        units: fleet.len(),
        p_min: fleet.p_min(),
        p_max: fleet.p_max(),
        fill_seconds,
        dispatches,
        unreachable,
    };
    match cli.format {
        OutputFormat::Table => write_table(&report),
        OutputFormat::Csv => write_csv(&report),
        OutputFormat::Json => write_json(&report)?,
    }
    Ok(())
}

fn parse_fleet(source: &str) -> Result<Fleet, String> {
    let mut rows = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| format!("line {}: invalid number `{tok}`", line_no + 1))
            })
            .collect::<Result<Vec<f64>, String>>()?;
        rows.push(row);
    }
    Fleet::from_rows(&rows).map_err(|e| e.to_string())
}

/// Up to `count` evenly spaced demands, always including `p_min` and `p_max`.
fn sample_demands(p_min: usize, p_max: usize, count: usize) -> Vec<usize> {
    if count <= 1 || p_min >= p_max {
        return vec![p_max];
    }
    let span = p_max - p_min;
    let mut demands: Vec<usize> = (0..count)
        .map(|k| p_min + span * k / (count - 1))
        .collect();
    demands.dedup();
    demands
}

fn write_table(report: &Report) {
    println!(
        "units={} p_min={} p_max={} fill={:.6}s",
        report.units, report.p_min, report.p_max, report.fill_seconds
    );
    let header: Vec<String> = (1..=report.units).map(|i| format!("u{i}")).collect();
    println!("{:>8} {:>14}  {}", "demand", "cost", header.join(" "));
    for d in &report.dispatches {
        let outputs: Vec<String> = d.allocation.iter().map(|p| p.to_string()).collect();
        println!("{:>8} {:>14.2}  {}", d.demand, d.cost, outputs.join(" "));
    }
    for demand in &report.unreachable {
        println!("{demand:>8} {:>14}", "unreachable");
    }
}

fn write_csv(report: &Report) {
    let header: Vec<String> = (1..=report.units).map(|i| format!("unit{i}")).collect();
    println!("demand,cost,{}", header.join(","));
    for d in &report.dispatches {
        let outputs: Vec<String> = d.allocation.iter().map(|p| p.to_string()).collect();
        println!("{},{},{}", d.demand, d.cost, outputs.join(","));
    }
    for demand in &report.unreachable {
        println!("{demand},inf,{}", vec!["0"; report.units].join(","));
    }
}

fn write_json(report: &Report) -> Result<(), String> {
    let text = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comments_and_blank_lines() {
        let src = "# a b c pu pl\n0.01 2.0 10 50 10\n\n0.02 1.5 5 30 5\n";
        let fleet = parse_fleet(src).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.p_max(), 80);
        assert_eq!(fleet.p_min(), 5);
    }

    #[test]
    fn reports_bad_tokens_with_line_number() {
        let err = parse_fleet("1 2 3 4 x\n").unwrap_err();
        assert!(err.starts_with("line 1:"), "{err}");
    }

    #[test]
    fn samples_are_evenly_spaced() {
        assert_eq!(sample_demands(10, 50, 5), vec![10, 20, 30, 40, 50]);
        assert_eq!(sample_demands(0, 2, 5), vec![0, 1, 2]);
        assert_eq!(sample_demands(7, 7, 5), vec![7]);
        assert_eq!(sample_demands(0, 10, 4), vec![0, 3, 6, 10]);
    }
}
