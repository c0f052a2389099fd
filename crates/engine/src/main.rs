use anyhow::Context;
use clap::Parser;

use tidepool_core::evaluate_position;
use tidepool_engine::{load_scenarios, EngineConfig, ScenarioReport, ScenarioResult};

#[derive(Parser, Debug)]
#[command(name = "tidepool-engine")]
#[command(about = "Off-chain scenario runner for position economics")]
struct Args {
    /// Path to the scenario JSON file
    #[arg(short, long)]
    scenarios: String,

    /// Path to an engine configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    log::info!("Starting Tidepool engine");

    // Load configuration
    let config = match &args.config {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("loading config from {path}"))?
        }
        None => EngineConfig::default(),
    };

    // Load scenarios
    let file = load_scenarios(&args.scenarios)
        .with_context(|| format!("loading scenarios from {}", args.scenarios))?;
    log::info!(
        "Loaded {} scenarios from {}",
        file.scenarios.len(),
        args.scenarios
    );

    let mut results = Vec::with_capacity(file.scenarios.len());
    for scenario in file.scenarios {
        log::debug!("Evaluating scenario '{}'", scenario.name);

        match evaluate_position(&scenario.input) {
            Ok(economics) => {
                log::info!(
                    "{}: 24h fee ${}, hedge notional {}, funding cost ${}",
                    scenario.name,
                    economics.estimated_fee_24h.round_dp(2),
                    economics.required_hedge_notional.round_dp(2),
                    economics.funding_cost.round_dp(2),
                );
                results.push(ScenarioResult {
                    name: scenario.name,
                    economics: Some(economics),
                    error: None,
                });
            }
            Err(e) => {
                log::error!("Scenario '{}' failed: {}", scenario.name, e);
                if config.run.halt_on_error {
                    anyhow::bail!("scenario '{}' failed: {e}", scenario.name);
                }
                results.push(ScenarioResult {
                    name: scenario.name,
                    economics: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let report = ScenarioReport {
        generated_at: chrono::Utc::now(),
        results,
    };

    let json = if args.pretty || config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match args.output.as_ref().or(config.output.path.as_ref()) {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("writing report to {path}"))?;
            log::info!("Report written to {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}
