// rtsim_sim/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use rtsim_sim::cli::Cli;
use rtsim_sim::config::{discover_scenarios, load_scenario, ScenarioConfig};
use rtsim_sim::report;
use rtsim_sim::scenario::Scenario;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let scenarios = collect_scenarios(&cli)?;
    if scenarios.is_empty() {
        warn!("No scenarios to run.");
        return Ok(());
    }

    let quantities = cli.selected_quantities();
    let references = cli.selected_references();
    let mut failures = 0usize;

    for (key, config) in &scenarios {
        match run_one(key, config, &quantities, &references, cli.in_g) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                failures += 1;
                error!("Scenario '{}' failed: {:#}", key, e);
            }
        }
    }

    info!(
        "Finished {} scenario(s), {} failed.",
        scenarios.len(),
        failures
    );
    if failures > 0 {
        anyhow::bail!("{failures} of {} scenario(s) failed", scenarios.len());
    }
    Ok(())
}

fn collect_scenarios(cli: &Cli) -> Result<Vec<(String, ScenarioConfig)>> {
    if let Some(dir) = &cli.scenario_dir {
        let catalog = discover_scenarios(dir)
            .with_context(|| format!("failed to discover scenarios in {dir:?}"))?;
        return Ok(catalog.0.into_iter().collect());
    }

    let config = load_scenario(&cli.scenario)
        .with_context(|| format!("failed to load scenario {:?}", cli.scenario))?;
    let key = cli
        .scenario
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.testbed.name.to_string());
    Ok(vec![(key, config)])
}

fn run_one(
    key: &str,
    config: &ScenarioConfig,
    quantities: &[rtsim_core::testbed::Quantity],
    references: &[rtsim_core::testbed::Reference],
    in_g: bool,
) -> Result<String> {
    let mut scenario = Scenario::from_config(config).context("failed to build testbed")?;
    let outputs = scenario.run().context("failed to process testbed")?;
    let title = format!("{key} ({})", config.testbed.name);
    Ok(report::render(&title, outputs, quantities, references, in_g))
}
