use gauge::*;
use anyhow::Result;
use clap::Parser;

/// A synthetic workload generator for the bandwidth allocator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to output CSV
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output:         PathBuf,

    /// Number of requests to spawn
    #[arg(short, long, default_value_t = 100)]
    num:            usize,

    /// Demand upper bound
    #[arg(long, default_value_t = 500.0)]
    max_demand:     f64,

    /// Priority upper bound
    #[arg(long, default_value_t = 100.0)]
    max_priority:   f64,

    /// RNG seed, for reproducible workloads
    #[arg(short, long, default_value_t = 0)]
    seed:           u64,
}

fn main() -> Result<()> {
    let cli = Args::parse();
    let requests = synth_requests(cli.num, cli.max_demand, cli.max_priority, cli.seed);
    write_csv(cli.output, &requests)?;
    println!("Wrote {} requests.", cli.num);

    Ok(())
}
