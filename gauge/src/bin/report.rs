use gauge::*;
use corebw::utils::*;
use anyhow::Result;
use clap::{Parser, ValueEnum};

/// An utility for running and cross-checking
/// bandwidth allocation instances.
#[derive(Parser, Debug)]
struct Args {
    /// Path to input CSV (name,demand,priority)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      PathBuf,

    /// Total available bandwidth
    #[arg(short, long)]
    capacity:   f64,

    /// Output format
    #[arg(value_enum)]
    format:     OutFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum OutFormat {
    /// Machine-readable JSON on stdout
    Json,
    /// Terse human-readable lines
    Text,
}

fn main() -> Result<()> {
    let cli = Args::parse();
    let input_path = cli.input;
    assert!(input_path.exists() && input_path.is_file(), "File does not exist");
    let parser = TaskCsvParser::new(input_path);
    let requests = parser.read_requests()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let summary = corebw::algo::allocate(cli.capacity, requests)?;

    // The engine guarantees these; a failed assert here means a
    // corebw bug, not a bad input.
    assert!(summary.is_conserved(), "Conservation violated!");
    for (req, res) in &summary.grants {
        assert!(
            res.allocated >= 0.0 && res.allocated <= req.demand,
            "Grant out of bounds!"
        );
    }

    match cli.format {
        OutFormat::Json => {
            let report = SummaryReport::from(&summary);
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        OutFormat::Text => {
            println!(
                "Capacity:\t{:.2}\nUsed:\t\t{:.2}\nTotal value:\t{:.2}\nFulfilled:\t{} of {} ({} partial)",
                summary.capacity_initial,
                summary.capacity_used,
                summary.total_value,
                summary.fulfilled_count(),
                summary.grants.len(),
                summary.partial_count()
            );
        },
    }

    Ok(())
}
