use corebw::*;
use corebw::utils::*;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;

/// A greedy bandwidth allocator (fractional knapsack)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input source
    #[arg(value_enum)]
    source:     InputSource,

    /// Path to input CSV (name,demand,priority; required for csv)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      Option<PathBuf>,

    /// Total available bandwidth (prompted for if absent)
    #[arg(short, long)]
    capacity:   Option<f64>,

    /// Suppress the per-request processing trace
    #[arg(short, long)]
    quiet:      bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum InputSource {
    /// A name,demand,priority CSV file
    Csv,
    /// Interactive prompts on stdin
    Prompt,
}

fn main() -> Result<()> {
    let cli = Args::parse();

    let capacity = match cli.capacity {
        Some(c) => { c },
        None    => { prompt_parse("Enter the total available bandwidth (e.g. 1000 Mbps): ")? },
    };

    let requests = match cli.source {
        InputSource::Csv    => {
            let input_path = cli.input
                .context("csv input requires --input")?;
            assert!(input_path.exists() && input_path.is_file(), "Invalid input path");
            let parser = TaskCsvParser::new(input_path);
            parser.read_requests()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?
        },
        InputSource::Prompt => { prompt_requests()? },
    };

    let summary = algo::allocate(capacity, requests)?;

    if !cli.quiet {
        print_trace(&summary);
    }
    print_table(&summary);

    Ok(())
}

fn prompt_parse<T: std::str::FromStr>(msg: &str) -> Result<T>
where T::Err: std::error::Error + Send + Sync + 'static {
    print!("{msg}");
    std::io::stdout().flush()?;
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;

    Ok(buf.trim().parse()?)
}

/// The interactive flow: number of tasks first, then one
/// name/demand/priority triple per task.
fn prompt_requests() -> Result<Vec<Request>> {
    let num: usize = prompt_parse("Enter the number of competing users/tasks: ")?;
    let mut res = Vec::with_capacity(num);
    for i in 0..num {
        println!("Task #{}:", i + 1);
        let name: String = prompt_parse("  Name: ")?;
        let demand: f64 = prompt_parse("  Demand (bandwidth requested): ")?;
        let priority: f64 = prompt_parse("  Priority (e.g. 1-100): ")?;
        res.push(Request { name, demand, priority });
    }

    Ok(res)
}

/// Replays the allocation decisions in processing order. The engine
/// is pure, so the running remainder is reconstructed from the
/// grants themselves.
fn print_trace(summary: &AllocationSummary) {
    println!("\n--- Processing allocation (highest priority/demand first) ---");
    let mut remaining = summary.capacity_initial;
    for (req, res) in &summary.grants {
        println!(
            "Considering '{}' (density: {}). Remaining bandwidth: {:.2}",
            req.name, req.density, remaining
        );
        remaining -= res.allocated;
        if res.fulfilled {
            println!("  -> Allocated full demand ({:.2})", res.allocated);
        } else if res.allocated > 0.0 {
            println!("  -> Allocated remaining bandwidth ({:.2})", res.allocated);
        } else {
            println!("  -> Nothing left to allocate");
        }
    }
}

fn print_table(summary: &AllocationSummary) {
    println!("\n--- Final bandwidth allocation table ---\n");
    println!(
        "Total bandwidth: {:.2} | Bandwidth used: {:.2} | Total priority value: {:.2}",
        summary.capacity_initial, summary.capacity_used, summary.total_value
    );

    let bar = "-".repeat(96);
    println!("{bar}");
    println!(
        "| {:<20} | {:<10} | {:<15} | {:<15} | {:<18} |",
        "Task name", "Priority", "Demand", "Allocated", "Share of total (%)"
    );
    println!("{bar}");
    // Rows come out in allocation order (highest density first),
    // which is usually the order the reader cares about.
    for (req, res) in &summary.grants {
        println!(
            "| {:<20} | {:<10.2} | {:<15.2} | {:<15.2} | {:<18.2} |",
            req.name,
            req.priority,
            req.demand,
            res.allocated,
            res.share * 100.0
        );
    }
    println!("{bar}");
}
