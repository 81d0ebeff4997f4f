//! Results storage and retrieval
//!
//! Provides persistent storage for verification runs in JSON format.

#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::{ScenarioResult, ScenarioStatus, SuiteSummary};

/// Stored verification run containing all results
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredRun {
    /// Unique run ID
    pub id: String,

    /// Base URL of the service verified
    pub target: String,

    /// Timestamp when the run started
    pub started_at: DateTime<Utc>,

    /// Timestamp when the run completed
    pub completed_at: DateTime<Utc>,

    /// Number of rounds
    pub rounds: u32,

    /// Round summaries
    pub summaries: Vec<StoredRoundSummary>,

    /// Aggregate statistics
    pub aggregate: Option<AggregateStats>,

    /// Run configuration
    pub config: RunConfig,

    /// Environment info
    pub environment: EnvironmentInfo,
}

/// Stored round summary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredRoundSummary {
    pub round: u32,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,

    /// Pass rate (0.0 - 1.0)
    pub pass_rate: f64,

    pub duration_ms: u64,
    pub results: Vec<StoredScenarioResult>,
}

/// Stored scenario result
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredScenarioResult {
    pub scenario_number: u8,
    pub scenario_name: String,
    pub suite: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub message: Option<String>,
}

/// Aggregate statistics across all rounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregateStats {
    pub avg_pass_rate: f64,
    pub min_pass_rate: f64,
    pub max_pass_rate: f64,
    pub avg_duration_ms: u64,
    pub total_duration_ms: u64,

    /// Per-scenario statistics
    pub scenario_stats: BTreeMap<String, StoredScenarioStats>,
}

/// Statistics for a single scenario across rounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredScenarioStats {
    pub pass_count: u32,
    pub fail_count: u32,
    pub pass_rate: f64,
    pub avg_duration_ms: u64,
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
}

/// Run configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub parallel: bool,
    pub concurrency: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reqres.in/api/".to_string(),
            timeout_secs: 30,
            parallel: false,
            concurrency: 4,
        }
    }
}

/// Environment information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub os: String,
    pub arch: String,
    pub tool_version: String,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl StoredRun {
    /// Create a new stored run
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            id: generate_run_id(),
            target: target.into(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            rounds: 0,
            summaries: Vec::new(),
            aggregate: None,
            config: RunConfig::default(),
            environment: EnvironmentInfo::default(),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a round summary
    pub fn add_round(&mut self, round: u32, summary: &SuiteSummary) {
        let stored = StoredRoundSummary::from_summary(round, summary);
        self.summaries.push(stored);
        self.rounds = round;
        self.completed_at = Utc::now();
    }

    /// Calculate aggregate statistics
    pub fn calculate_aggregate(&mut self) {
        if self.summaries.is_empty() {
            return;
        }

        let mut pass_rates: Vec<f64> = Vec::new();
        let mut durations: Vec<u64> = Vec::new();
        let mut per_scenario: BTreeMap<String, Vec<(bool, u64)>> = BTreeMap::new();

        for summary in &self.summaries {
            pass_rates.push(summary.pass_rate);
            durations.push(summary.duration_ms);

            for result in &summary.results {
                per_scenario
                    .entry(result.scenario_name.clone())
                    .or_default()
                    .push((result.passed, result.duration_ms));
            }
        }

        let avg_pass_rate = pass_rates.iter().sum::<f64>() / pass_rates.len() as f64;
        let min_pass_rate = pass_rates.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_pass_rate = pass_rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let total_duration_ms: u64 = durations.iter().sum();
        let avg_duration_ms = total_duration_ms / durations.len() as u64;

        let mut scenario_stats: BTreeMap<String, StoredScenarioStats> = BTreeMap::new();
        for (name, results) in per_scenario {
            let pass_count = results.iter().filter(|(p, _)| *p).count() as u32;
            let fail_count = results.len() as u32 - pass_count;
            let pass_rate = pass_count as f64 / results.len() as f64;

            let durs: Vec<u64> = results.iter().map(|(_, d)| *d).collect();
            let avg_dur = durs.iter().sum::<u64>() / durs.len() as u64;
            let min_dur = *durs.iter().min().unwrap_or(&0);
            let max_dur = *durs.iter().max().unwrap_or(&0);

            scenario_stats.insert(
                name,
                StoredScenarioStats {
                    pass_count,
                    fail_count,
                    pass_rate,
                    avg_duration_ms: avg_dur,
                    min_duration_ms: min_dur,
                    max_duration_ms: max_dur,
                },
            );
        }

        self.aggregate = Some(AggregateStats {
            avg_pass_rate,
            min_pass_rate,
            max_pass_rate,
            avg_duration_ms,
            total_duration_ms,
            scenario_stats,
        });
    }
}

impl StoredRoundSummary {
    /// Convert from a SuiteSummary
    pub fn from_summary(round: u32, summary: &SuiteSummary) -> Self {
        let results: Vec<StoredScenarioResult> = summary
            .results
            .iter()
            .map(StoredScenarioResult::from_result)
            .collect();

        let pass_rate = if summary.total > 0 {
            summary.passed as f64 / summary.total as f64
        } else {
            0.0
        };

        Self {
            round,
            total: summary.total,
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
            pass_rate,
            duration_ms: summary.total_duration_ms,
            results,
        }
    }
}

impl StoredScenarioResult {
    /// Convert from a ScenarioResult
    pub fn from_result(result: &ScenarioResult) -> Self {
        Self {
            scenario_number: result.scenario.number(),
            scenario_name: result.scenario.name().to_string(),
            suite: result.scenario.suite().to_string(),
            passed: result.status == ScenarioStatus::Pass,
            duration_ms: result.duration_ms,
            message: result.message.clone(),
        }
    }
}

/// Generate unique run ID
fn generate_run_id() -> String {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let random: u32 = rand::random::<u32>() % 10000;
    format!("{timestamp}_{random:04}")
}

/// Turn a base URL into a directory-safe name
fn target_dir_name(target: &str) -> String {
    target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

/// Results storage manager
pub struct ResultsStorage {
    /// Base directory for results
    base_dir: PathBuf,
}

impl ResultsStorage {
    /// Create a new results storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create with default directory
    pub fn default_dir() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reqres-verify")
            .join("results");
        Ok(Self::new(base_dir))
    }

    fn target_dir(&self, target: &str) -> PathBuf {
        self.base_dir.join(target_dir_name(target))
    }

    fn run_path(&self, target: &str, run_id: &str) -> PathBuf {
        self.target_dir(target).join(format!("{run_id}.json"))
    }

    /// Save a run
    pub fn save(&self, run: &StoredRun) -> Result<PathBuf> {
        let target_dir = self.target_dir(&run.target);
        fs::create_dir_all(&target_dir)?;

        let path = self.run_path(&run.target, &run.id);
        let file = File::create(&path).context("Failed to create results file")?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, run).context("Failed to write results")?;

        info!("Saved results to {}", path.display());
        Ok(path)
    }

    /// Load a run
    pub fn load(&self, target: &str, run_id: &str) -> Result<StoredRun> {
        let path = self.run_path(target, run_id);
        let file = File::open(&path).context("Failed to open results file")?;
        let reader = BufReader::new(file);

        let run: StoredRun = serde_json::from_reader(reader).context("Failed to parse results")?;

        debug!("Loaded results from {}", path.display());
        Ok(run)
    }

    /// Load from a specific path
    pub fn load_from_path(&self, path: &Path) -> Result<StoredRun> {
        let file = File::open(path).context("Failed to open results file")?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context("Failed to parse results")
    }

    /// Load all runs for a target
    pub fn load_target(&self, target: &str) -> Result<Vec<StoredRun>> {
        let target_dir = self.target_dir(target);
        if !target_dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&target_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match self.load_from_path(&path) {
                    Ok(run) => runs.push(run),
                    Err(e) => {
                        debug!("Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(runs)
    }

    /// List all targets with stored results
    pub fn list_targets(&self) -> Result<Vec<String>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut targets = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    targets.push(name.to_string());
                }
            }
        }

        targets.sort();
        Ok(targets)
    }

    /// List all runs for a target
    pub fn list_runs(&self, target: &str) -> Result<Vec<RunInfo>> {
        let runs = self.load_target(target)?;
        Ok(runs
            .into_iter()
            .map(|run| RunInfo {
                pass_rate: run
                    .aggregate
                    .as_ref()
                    .map(|a| a.avg_pass_rate)
                    .unwrap_or(0.0),
                id: run.id,
                target: run.target,
                started_at: run.started_at,
                rounds: run.rounds,
            })
            .collect())
    }

    /// Get latest run for a target
    pub fn latest(&self, target: &str) -> Result<Option<StoredRun>> {
        let runs = self.load_target(target)?;
        Ok(runs.into_iter().next())
    }

    /// Delete a run
    pub fn delete(&self, target: &str, run_id: &str) -> Result<()> {
        let path = self.run_path(target, run_id);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("Deleted results: {}", path.display());
        }
        Ok(())
    }

    /// Export a run to a file
    pub fn export(&self, run: &StoredRun, path: &Path, format: ExportFormat) -> Result<()> {
        match format {
            ExportFormat::Json => {
                let file = File::create(path)?;
                let writer = BufWriter::new(file);
                serde_json::to_writer_pretty(writer, run)?;
            }
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(path)?;

                writer.write_record([
                    "round",
                    "scenario_number",
                    "scenario_name",
                    "suite",
                    "passed",
                    "duration_ms",
                    "message",
                ])?;

                for summary in &run.summaries {
                    for result in &summary.results {
                        writer.write_record([
                            summary.round.to_string(),
                            result.scenario_number.to_string(),
                            result.scenario_name.clone(),
                            result.suite.clone(),
                            result.passed.to_string(),
                            result.duration_ms.to_string(),
                            result.message.clone().unwrap_or_default(),
                        ])?;
                    }
                }
                writer.flush()?;
            }
        }

        info!("Exported results to {}", path.display());
        Ok(())
    }
}

/// Brief run information
#[derive(Clone, Debug)]
pub struct RunInfo {
    pub id: String,
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub rounds: u32,
    pub pass_rate: f64,
}

/// Export format
#[derive(Clone, Copy, Debug)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_str)
    }
}
