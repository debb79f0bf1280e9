use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use manufacturing_mc::config::{self, Overrides};
use manufacturing_mc::logging::init_tracing;
use manufacturing_mc::monte_carlo::run_seeded;
use manufacturing_mc::reporting::display_report;

/// Monte Carlo simulation of manufacturing profit
#[derive(Parser, Debug)]
#[command(name = "manufacturing-mc")]
#[command(about = "Estimate the profit distribution of a production plan under uncertain demand and costs")]
#[command(version)]
struct Cli {
    /// TOML file with run settings; flags override its values
    #[arg(long, short = 'c', env = "MFG_MC_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Emit the full result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Maximum histogram rows in the text report
    #[arg(long, default_value_t = 30)]
    rows: usize,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref(), &cli.overrides)
        .context("failed to load run configuration")?;

    let result = run_seeded(&config.params, config.seed, config.bins)
        .context("simulation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
        println!("{}", json);
    } else {
        display_report(&result, cli.rows);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
