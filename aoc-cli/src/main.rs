//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logging;
mod output;

// Link aoc-2020 so its solver plugins are collected
use aoc_2020 as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::{Executor, Verification};
use output::OutputFormatter;
use tracing::{info, warn};

fn main() {
    let args = Args::parse();
    let outcome = Config::from_args(args).and_then(|config| {
        logging::init_logger(config.verbose, config.quiet);
        run(config)
    });

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;

    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = executor.missing_inputs(&work_items);
    if !missing_inputs.is_empty() && !config.quiet {
        println!(
            "Missing {} input file(s) in {}:",
            missing_inputs.len(),
            config.input_dir.display()
        );
        for (year, day) in &missing_inputs {
            println!("  - {}_day{:02}.txt", year, day);
        }
    }

    info!(
        solvers = work_items.len(),
        threads = config.thread_count,
        mode = ?config.parallelize_by,
        "running"
    );
    let expected_keys = ResultKey::for_work_items(&work_items);

    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Collect and display results in order using aggregator
    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results, config.verify);

    let incorrect = results
        .iter()
        .filter(|r| matches!(r.verification, Some(Verification::Incorrect { .. })))
        .count();
    if incorrect > 0 {
        return Err(CliError::VerificationFailed(incorrect));
    }
    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
