//! Parallel scenario execution
//!
//! Runs independent scenarios concurrently under a semaphore bound. Results
//! are re-sorted by scenario number so reporting order never depends on
//! completion order.

#![allow(dead_code)]

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::models::{Scenario, ScenarioResult, ScenarioStatus, SuiteSummary};
use crate::scenarios::{self, ScenarioContext};

/// Parallel scenario executor
pub struct ParallelExecutor {
    max_concurrent: usize,
}

impl ParallelExecutor {
    pub fn new(max_concurrent: usize) -> Self {
        Self { max_concurrent }
    }

    /// Run the given scenarios concurrently
    pub async fn run_scenarios_parallel(
        &self,
        ctx: &ScenarioContext,
        selected: Vec<Scenario>,
    ) -> Vec<ScenarioResult> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::new();

        for scenario in selected {
            let semaphore = semaphore.clone();
            let ctx = ctx.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore never closes");

                debug!("Starting parallel execution of {}", scenario);

                match scenarios::run_scenario(scenario, &ctx).await {
                    Ok(result) => result,
                    Err(e) => ScenarioResult::error(scenario, e.to_string()),
                }
            });

            handles.push(handle);
        }

        join_all(handles)
            .await
            .into_iter()
            .filter_map(|r| r.ok())
            .collect()
    }

    /// Run the whole catalog in parallel
    pub async fn run_all_parallel(&self, ctx: &ScenarioContext) -> SuiteSummary {
        info!(
            "Running all scenarios in parallel (max {} concurrent) against {}",
            self.max_concurrent,
            ctx.client.base_url()
        );

        let start = Instant::now();
        let mut results = self.run_scenarios_parallel(ctx, Scenario::all()).await;
        results.sort_by_key(|r| r.scenario.number());

        let summary = SuiteSummary::new(1, ctx.client.base_url(), results);

        info!(
            "Parallel execution completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Batch runner for multiple verification rounds
pub struct BatchRunner {
    executor: ParallelExecutor,
    rounds: u32,
}

impl BatchRunner {
    pub fn new(max_concurrent: usize, rounds: u32) -> Self {
        Self {
            executor: ParallelExecutor::new(max_concurrent),
            rounds,
        }
    }

    /// Run multiple rounds of parallel verification
    pub async fn run_rounds(&self, ctx: &ScenarioContext) -> Vec<SuiteSummary> {
        info!(
            "Running {} rounds against {}",
            self.rounds,
            ctx.client.base_url()
        );

        let mut summaries = Vec::new();

        for round in 1..=self.rounds {
            info!("=== Round {}/{} ===", round, self.rounds);

            let mut results = self
                .executor
                .run_scenarios_parallel(ctx, Scenario::all())
                .await;
            results.sort_by_key(|r| r.scenario.number());

            let summary = SuiteSummary::new(round, ctx.client.base_url(), results);

            info!(
                "Round {} completed: {}/{} passed ({:.1}%)",
                round,
                summary.passed,
                summary.total,
                summary.pass_rate()
            );

            summaries.push(summary);
        }

        summaries
    }

    /// Aggregate results across multiple rounds
    pub fn aggregate_results(summaries: &[SuiteSummary]) -> AggregateResult {
        let total_rounds = summaries.len() as u32;
        let mut scenario_stats: HashMap<Scenario, ScenarioStats> = HashMap::new();

        for summary in summaries {
            for result in &summary.results {
                let stats = scenario_stats.entry(result.scenario).or_default();

                match result.status {
                    ScenarioStatus::Pass => stats.passes += 1,
                    ScenarioStatus::Fail => stats.failures += 1,
                    ScenarioStatus::Skip => stats.skips += 1,
                    ScenarioStatus::Error => stats.errors += 1,
                }
                stats.total_duration_ms += result.duration_ms;
            }
        }

        let pass_rates: HashMap<Scenario, f64> = scenario_stats
            .iter()
            .map(|(scenario, stats)| {
                let total = stats.passes + stats.failures + stats.errors;
                let rate = if total > 0 {
                    (stats.passes as f64 / total as f64) * 100.0
                } else {
                    0.0
                };
                (*scenario, rate)
            })
            .collect();

        let overall_pass_rate = if summaries.is_empty() {
            0.0
        } else {
            summaries.iter().map(|s| s.pass_rate()).sum::<f64>() / summaries.len() as f64
        };

        AggregateResult {
            total_rounds,
            scenario_stats,
            pass_rates,
            overall_pass_rate,
        }
    }
}

/// Statistics for a single scenario across rounds
#[derive(Clone, Debug, Default)]
pub struct ScenarioStats {
    pub passes: u32,
    pub failures: u32,
    pub skips: u32,
    pub errors: u32,
    pub total_duration_ms: u64,
}

impl ScenarioStats {
    pub fn avg_duration_ms(&self) -> u64 {
        let total = self.passes + self.failures + self.errors;
        if total > 0 {
            self.total_duration_ms / total as u64
        } else {
            0
        }
    }
}

/// Aggregate results across multiple verification rounds
#[derive(Clone, Debug)]
pub struct AggregateResult {
    pub total_rounds: u32,
    pub scenario_stats: HashMap<Scenario, ScenarioStats>,
    pub pass_rates: HashMap<Scenario, f64>,
    pub overall_pass_rate: f64,
}

impl AggregateResult {
    /// Scenarios sorted by pass rate, lowest first
    pub fn flaky_scenarios(&self) -> Vec<(Scenario, f64)> {
        let mut scenarios: Vec<_> = self
            .pass_rates
            .iter()
            .map(|(scenario, rate)| (*scenario, *rate))
            .collect();
        scenarios.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scenarios
    }

    /// Scenarios that passed in every round
    pub fn stable_scenarios(&self) -> Vec<Scenario> {
        self.pass_rates
            .iter()
            .filter(|(_, rate)| **rate >= 100.0)
            .map(|(scenario, _)| *scenario)
            .collect()
    }
}
