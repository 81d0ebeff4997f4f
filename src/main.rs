//! reqres-verify - Contract verification harness for the reqres user API
//!
//! A CLI tool that exercises a remote user-management API against its
//! documented contract: status codes, payload shape, pagination arithmetic,
//! expected failures, and response timing under an artificial delay.
//!
//! ## Features
//!
//! - 14 scenarios across listing, lifecycle, registration, login, timing, and
//!   a browser-driven search flow
//! - Concurrent request fan-out with input-order result correspondence
//! - Sequential or parallel execution, multiple rounds with flakiness stats
//! - Multiple output formats (Table, JSON, CSV) and persisted run history
//!
//! ## Usage
//!
//! ```bash
//! # Run all scenarios
//! reqres-verify verify
//!
//! # Run one scenario against a local deployment
//! reqres-verify verify --scenario 3 --base-url http://localhost:8080/api/
//!
//! # Run 100 rounds in parallel and keep the run
//! reqres-verify verify --rounds 100 --parallel --store
//!
//! # List scenarios
//! reqres-verify list --detailed
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod browser;
mod cli;
mod config;
mod contract;
mod executor;
mod fanout;
mod http;
mod models;
mod output;
mod results;
mod scenarios;
mod utils;

use cli::Args;
use config::AppConfig;
use executor::{BatchRunner, ParallelExecutor, ScenarioRunner};
use http::ApiClient;
use models::{Scenario, SuiteSummary};
use output::{write_results_to_file, OutputFormat, ResultFormatter};
use results::{ExportFormat, ResultsStorage, StoredRun};
use scenarios::ScenarioContext;
use utils::logger::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    init_logger(level);

    match args.command {
        cli::Command::Verify(verify_args) => {
            run_verify(verify_args).await?;
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
        }
        cli::Command::Results(results_args) => {
            show_results(results_args)?;
        }
    }

    Ok(())
}

async fn run_verify(args: cli::VerifyArgs) -> Result<()> {
    let mut app_config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(base_url) = &args.base_url {
        app_config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        app_config.timeout_secs = timeout;
    }
    if args.parallel {
        app_config.parallel = true;
    }

    let client = ApiClient::with_timeout(&app_config.base_url, app_config.timeout_secs)?;
    let ctx = ScenarioContext::new(client).with_flow(app_config.flow.clone());

    info!(
        "Verifying {} ({} rounds)",
        app_config.base_url, args.rounds
    );

    let formatter =
        ResultFormatter::new(OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Table));

    let selected = select_scenarios(&args)?;
    let skip = parse_skip(args.skip.as_deref())?;

    let summaries: Vec<SuiteSummary> = if app_config.parallel {
        if args.rounds > 1 {
            let batch_runner = BatchRunner::new(args.concurrent, args.rounds);
            batch_runner.run_rounds(&ctx).await
        } else {
            let executor = ParallelExecutor::new(args.concurrent);
            vec![executor.run_all_parallel(&ctx).await]
        }
    } else {
        let runner = ScenarioRunner::new(ctx).with_skip(skip);

        if args.rounds > 1 {
            runner.run_rounds(args.rounds).await
        } else {
            vec![runner.run_scenarios(&selected).await]
        }
    };

    for summary in &summaries {
        println!("{}", formatter.format_summary(summary));
    }

    if summaries.len() > 1 {
        let aggregate = BatchRunner::aggregate_results(&summaries);
        println!(
            "{}",
            formatter.format_aggregate(&aggregate, &app_config.base_url)
        );
    }

    if let Some(path) = &args.output {
        let last = summaries.last().expect("at least one round ran");
        write_results_to_file(
            path,
            last,
            OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Table),
        )?;
        println!("Results written to {path}");
    }

    if args.store {
        let mut run = StoredRun::new(&app_config.base_url).with_config(results::RunConfig {
            base_url: app_config.base_url.clone(),
            timeout_secs: app_config.timeout_secs,
            parallel: app_config.parallel,
            concurrency: args.concurrent,
        });
        for summary in &summaries {
            run.add_round(summary.round, summary);
        }
        run.calculate_aggregate();

        let storage = ResultsStorage::default_dir()?;
        let path = storage.save(&run)?;
        println!("Run stored at {}", path.display());
    }

    if summaries.iter().any(|s| !s.is_all_passed()) {
        std::process::exit(1);
    }

    Ok(())
}

fn select_scenarios(args: &cli::VerifyArgs) -> Result<Vec<Scenario>> {
    if let Some(number) = args.scenario {
        let scenario = Scenario::from_number(number)
            .ok_or_else(|| anyhow::anyhow!("Invalid scenario number: {number}"))?;
        return Ok(vec![scenario]);
    }

    if let Some(suite) = &args.suite {
        let selected: Vec<Scenario> = Scenario::all()
            .into_iter()
            .filter(|s| s.suite().eq_ignore_ascii_case(suite))
            .collect();
        if selected.is_empty() {
            anyhow::bail!("Unknown suite: {suite}");
        }
        return Ok(selected);
    }

    Ok(Scenario::all())
}

fn parse_skip(skip: Option<&str>) -> Result<Vec<u8>> {
    match skip {
        None => Ok(Vec::new()),
        Some(list) => list
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<u8>()
                    .map_err(|_| anyhow::anyhow!("Invalid scenario number in skip list: {s}"))
            })
            .collect(),
    }
}

fn list_scenarios(args: cli::ListArgs) {
    if args.suites {
        println!("\nScenario Suites:\n");
        let mut seen: Vec<&str> = Vec::new();
        for scenario in Scenario::all() {
            if !seen.contains(&scenario.suite()) {
                seen.push(scenario.suite());
            }
        }
        for suite in seen {
            let count = Scenario::all()
                .iter()
                .filter(|s| s.suite() == suite)
                .count();
            println!("  - {suite:14} ({count} scenarios)");
        }
        println!();
        return;
    }

    println!("\nVerification Scenarios (14 total)\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_suite = "";

    for scenario in Scenario::all() {
        let suite = scenario.suite();
        if suite != current_suite {
            if !current_suite.is_empty() {
                println!();
            }
            println!("\n{suite} Suite:");
            println!("──────────────────────────────────────────────────────────────────────");
            current_suite = suite;
        }

        if args.detailed {
            println!(
                "  {:2}. {:26} [{}]",
                scenario.number(),
                scenario.name(),
                scenario.suite()
            );
        } else {
            println!("  {:2}. {}", scenario.number(), scenario.name());
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

fn show_results(args: cli::ResultsArgs) -> Result<()> {
    let storage = ResultsStorage::default_dir()?;

    let Some(target) = &args.target else {
        let targets = storage.list_targets()?;
        if targets.is_empty() {
            println!("No stored runs.");
        } else {
            println!("\nStored targets:\n");
            for target in targets {
                println!("  - {target}");
            }
            println!("\nUse --target <base-url> to inspect runs.\n");
        }
        return Ok(());
    };

    if let Some(export_path) = &args.export {
        let Some(run) = storage.latest(target)? else {
            anyhow::bail!("No stored runs for {target}");
        };
        let path = std::path::Path::new(export_path);
        let format = ExportFormat::from_extension(path)
            .ok_or_else(|| anyhow::anyhow!("Unknown export extension: {export_path}"))?;
        storage.export(&run, path, format)?;
        println!("Exported run {} to {export_path}", run.id);
        return Ok(());
    }

    if args.summary {
        let Some(run) = storage.latest(target)? else {
            anyhow::bail!("No stored runs for {target}");
        };
        println!("\nLatest run {} ({} rounds)", run.id, run.rounds);
        if let Some(aggregate) = &run.aggregate {
            println!(
                "Pass rate: avg {:.1}% (min {:.1}%, max {:.1}%)",
                aggregate.avg_pass_rate * 100.0,
                aggregate.min_pass_rate * 100.0,
                aggregate.max_pass_rate * 100.0
            );
        }
        return Ok(());
    }

    let runs = storage.list_runs(target)?;
    if runs.is_empty() {
        println!("No stored runs for {target}.");
        return Ok(());
    }

    println!("\nRuns for {target}:\n");
    for run in runs {
        println!(
            "  {}  rounds: {:3}  pass rate: {:5.1}%  started: {}",
            run.id,
            run.rounds,
            run.pass_rate * 100.0,
            run.started_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!();

    Ok(())
}
