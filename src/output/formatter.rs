//! Output formatters for scenario results
//!
//! Provides JSON, Table, CSV, and summary output formats.

#![allow(dead_code)]

use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::executor::AggregateResult;
use crate::models::{ScenarioResult, ScenarioStatus, SuiteSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single scenario result
    pub fn format_result(&self, result: &ScenarioResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Csv => self.format_result_csv(result),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn format_result_table(&self, result: &ScenarioResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                ScenarioStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                ScenarioStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                ScenarioStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                ScenarioStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match result.status {
                ScenarioStatus::Pass => "✓ PASS",
                ScenarioStatus::Fail => "✗ FAIL",
                ScenarioStatus::Skip => "○ SKIP",
                ScenarioStatus::Error => "! ERROR",
            }
        };

        format!(
            "{:2}. {:26} {} [{:>6}ms]",
            result.scenario.number(),
            result.scenario.name(),
            status_str,
            result.duration_ms
        )
    }

    fn format_result_csv(&self, result: &ScenarioResult) -> String {
        format!(
            "{},{},{},{},{},\"{}\"",
            result.scenario.number(),
            result.scenario.name(),
            result.scenario.suite(),
            result.status,
            result.duration_ms,
            result.message.as_deref().unwrap_or("").replace('"', "\"\"")
        )
    }

    fn format_result_summary(&self, result: &ScenarioResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.scenario.name(),
            result.duration_ms
        )
    }

    /// Format a round summary
    pub fn format_summary(&self, summary: &SuiteSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_summary_csv(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        // Header
        output.push_str("\n╔════════════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!(
            "║  Round {:3} - {:46} ║\n",
            summary.round,
            truncate(&summary.target, 46)
        ));
        output.push_str("╠════════════════════════════════════════════════════════════════════╣\n");

        // Results
        for result in &summary.results {
            output.push_str(&format!("║  {}  ║\n", self.format_result_table(result)));
        }

        // Footer
        output.push_str("╠════════════════════════════════════════════════════════════════════╣\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            "║  Total: {:2} | Pass: {} | Fail: {} | Skip: {:2} | Error: {:2}           ║\n",
            summary.total, pass_str, fail_str, summary.skipped, summary.errors
        ));
        output.push_str(&format!(
            "║  Pass Rate: {:5.1}% | Duration: {:6}ms                            ║\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str("╚════════════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_csv(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();
        output.push_str("scenario_num,scenario_name,suite,status,duration_ms,message\n");
        for result in &summary.results {
            output.push_str(&self.format_result_csv(result));
            output.push('\n');
        }
        output
    }

    fn format_summary_brief(&self, summary: &SuiteSummary) -> String {
        format!(
            "{} - Round {}: {}/{} passed ({:.1}%) in {}ms",
            summary.target,
            summary.round,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }

    /// Format aggregate results across rounds
    pub fn format_aggregate(&self, aggregate: &AggregateResult, target: &str) -> String {
        match self.format {
            OutputFormat::Table => self.format_aggregate_table(aggregate, target),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                #[derive(Serialize)]
                struct AggregateJson<'a> {
                    target: &'a str,
                    total_rounds: u32,
                    overall_pass_rate: f64,
                    scenario_pass_rates: HashMap<String, f64>,
                }

                let json = AggregateJson {
                    target,
                    total_rounds: aggregate.total_rounds,
                    overall_pass_rate: aggregate.overall_pass_rate,
                    scenario_pass_rates: aggregate
                        .pass_rates
                        .iter()
                        .map(|(k, v)| (k.name().to_string(), *v))
                        .collect(),
                };

                if self.format == OutputFormat::JsonPretty {
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                } else {
                    serde_json::to_string(&json).unwrap_or_default()
                }
            }
            _ => self.format_aggregate_table(aggregate, target),
        }
    }

    fn format_aggregate_table(&self, aggregate: &AggregateResult, target: &str) -> String {
        let mut output = String::new();

        output.push_str("\n═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            " Aggregate Results: {} ({} rounds)\n",
            target, aggregate.total_rounds
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output.push_str(&format!(
            " Overall Pass Rate: {:.1}%\n\n",
            aggregate.overall_pass_rate
        ));

        output.push_str(" Scenario Pass Rates:\n");
        output.push_str(" ───────────────────────────────────────────────────────────\n");

        let mut scenarios: Vec<_> = aggregate.pass_rates.iter().collect();
        scenarios.sort_by_key(|(scenario, _)| scenario.number());

        for (scenario, rate) in scenarios {
            let bar_len = (*rate / 5.0) as usize;
            let bar = "█".repeat(bar_len.min(20));
            let empty = "░".repeat(20usize.saturating_sub(bar_len));

            let rate_str = if self.colorize {
                if *rate >= 90.0 {
                    format!("\x1b[32m{rate:5.1}%\x1b[0m")
                } else if *rate >= 50.0 {
                    format!("\x1b[33m{rate:5.1}%\x1b[0m")
                } else {
                    format!("\x1b[31m{rate:5.1}%\x1b[0m")
                }
            } else {
                format!("{rate:5.1}%")
            };

            output.push_str(&format!(
                " {:2}. {:26} {} {} {}\n",
                scenario.number(),
                scenario.name(),
                bar,
                empty,
                rate_str
            ));
        }

        output.push_str(" ───────────────────────────────────────────────────────────\n");

        let flaky: Vec<_> = aggregate
            .flaky_scenarios()
            .into_iter()
            .filter(|(_, r)| *r < 100.0)
            .collect();
        if !flaky.is_empty() {
            output.push_str("\n Flaky Scenarios (< 100% pass rate):\n");
            for (scenario, rate) in flaky.iter().take(5) {
                output.push_str(&format!("   - {} ({:.1}%)\n", scenario.name(), rate));
            }
        }

        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

/// Write results to a file
pub fn write_results_to_file(
    path: &str,
    summary: &SuiteSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
