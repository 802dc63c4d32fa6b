mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::chart::{CompareArgs, SweepArgs};
use commands::simulate::{PayoffArgs, SimulateArgs};

/// Bond warrant pricing and scenario simulation
#[derive(Parser)]
#[command(
    name = "bwsim",
    version,
    about = "Bond warrant pricing and scenario simulation",
    long_about = "Values warrants written on fixed-coupon bonds with decimal precision. \
                  Simulates a yield move, sweeps saved positions across rate, time \
                  and volatility grids, and locates the break-even yield."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (JSON or YAML)
    #[arg(long, global = true, env = "BWSIM_CONFIG")]
    config: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one position under a yield move
    Simulate(SimulateArgs),
    /// Sweep saved positions along one axis
    Sweep(SweepArgs),
    /// P&L profile of one position across the rate grid
    Payoff(PayoffArgs),
    /// Simulate saved positions side by side
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

// Logs go to stderr so stdout stays parseable.
fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = cli.config.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args, config),
        Commands::Sweep(args) => commands::chart::run_sweep(args, config),
        Commands::Payoff(args) => commands::simulate::run_payoff(args, config),
        Commands::Compare(args) => commands::chart::run_compare(args, config),
        Commands::Version => {
            println!("bwsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
