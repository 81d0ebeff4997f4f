//! Sequential scenario runner
//!
//! Runs scenarios one at a time against an injected context. A scenario's
//! error becomes its own result; siblings in the round always still run.

use std::time::Instant;
use tracing::{error, info};

use crate::models::{Scenario, ScenarioResult, SuiteSummary};
use crate::scenarios::{self, ScenarioContext};

/// Sequential runner over the scenario catalog
pub struct ScenarioRunner {
    ctx: ScenarioContext,
    skip: Vec<u8>,
}

impl ScenarioRunner {
    pub fn new(ctx: ScenarioContext) -> Self {
        Self {
            ctx,
            skip: Vec::new(),
        }
    }

    /// Skip the given scenario numbers
    pub fn with_skip(mut self, skip: Vec<u8>) -> Self {
        self.skip = skip;
        self
    }

    fn target(&self) -> String {
        self.ctx.client.base_url().to_string()
    }

    /// Run a single scenario, isolating its failure modes
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioResult {
        if self.skip.contains(&scenario.number()) {
            return ScenarioResult::skip(scenario, "Skipped by configuration");
        }

        info!("Running {}", scenario);

        match scenarios::run_scenario(scenario, &self.ctx).await {
            Ok(result) => result,
            Err(e) => {
                error!("{} failed with error: {}", scenario, e);
                ScenarioResult::error(scenario, e.to_string())
            }
        }
    }

    /// Run the whole catalog sequentially
    pub async fn run_all(&self) -> SuiteSummary {
        self.run_scenarios(&Scenario::all()).await
    }

    /// Run the scenarios belonging to one named suite
    pub async fn run_suite(&self, suite: &str) -> SuiteSummary {
        let selected: Vec<Scenario> = Scenario::all()
            .into_iter()
            .filter(|s| s.suite().eq_ignore_ascii_case(suite))
            .collect();
        self.run_scenarios(&selected).await
    }

    /// Run a specific set of scenarios
    pub async fn run_scenarios(&self, selected: &[Scenario]) -> SuiteSummary {
        info!(
            "Starting verification round of {} scenarios against {}",
            selected.len(),
            self.target()
        );

        let start = Instant::now();
        let mut results = Vec::new();

        for &scenario in selected {
            let result = self.run_scenario(scenario).await;
            info!("  {}", result);
            results.push(result);
        }

        let summary = SuiteSummary::new(1, self.target(), results);

        info!(
            "Round completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }

    /// Run multiple rounds of the whole catalog
    pub async fn run_rounds(&self, num_rounds: u32) -> Vec<SuiteSummary> {
        info!("Running {} rounds against {}", num_rounds, self.target());

        let mut summaries = Vec::new();

        for round in 1..=num_rounds {
            info!("=== Round {}/{} ===", round, num_rounds);

            let mut results = Vec::new();
            for scenario in Scenario::all() {
                results.push(self.run_scenario(scenario).await);
            }

            let summary = SuiteSummary::new(round, self.target(), results);

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiClient;
    use crate::models::ScenarioStatus;

    fn dead_context() -> ScenarioContext {
        // Nothing listens here; every request is a transport failure.
        ScenarioContext::new(ApiClient::with_timeout("http://127.0.0.1:1", 2).unwrap())
    }

    #[tokio::test]
    async fn test_transport_errors_are_isolated_per_scenario() {
        let runner = ScenarioRunner::new(dead_context());
        let summary = runner
            .run_scenarios(&[Scenario::PagedList, Scenario::SingleUser])
            .await;

        // Both scenarios ran to a result; neither aborted the round.
        assert_eq!(summary.total, 2);
        assert_eq!(summary.errors, 2);
        for result in &summary.results {
            assert_eq!(result.status, ScenarioStatus::Error);
        }
    }

    #[tokio::test]
    async fn test_skip_list_short_circuits() {
        let runner = ScenarioRunner::new(dead_context()).with_skip(vec![1]);
        let result = runner.run_scenario(Scenario::PagedList).await;
        assert_eq!(result.status, ScenarioStatus::Skip);
    }

    #[tokio::test]
    async fn test_browser_scenario_skips_without_driver() {
        let runner = ScenarioRunner::new(dead_context());
        let result = runner.run_scenario(Scenario::SearchFlow).await;
        assert_eq!(result.status, ScenarioStatus::Skip);
    }

    #[tokio::test]
    async fn test_run_suite_filters_by_name() {
        let runner = ScenarioRunner::new(dead_context());
        let summary = runner.run_suite("registration").await;

        assert_eq!(summary.total, 2);
        let numbers: Vec<u8> = summary
            .results
            .iter()
            .map(|r| r.scenario.number())
            .collect();
        assert_eq!(numbers, vec![9, 10]);
    }
}
