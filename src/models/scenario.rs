//! Scenario catalog and result types
//!
//! Defines the 14 verification scenarios, their suite grouping, and the
//! per-scenario result and round summary shapes.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// All 14 verification scenarios
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Listing scenarios (1-4)
    PagedList,
    SearchByName,
    SingleUser,
    UnknownUser,

    // Lifecycle scenarios (5-8)
    CreateUser,
    ReplaceUser,
    AmendUser,
    RemoveUser,

    // Registration scenarios (9-10)
    Register,
    RegisterIncomplete,

    // Login scenarios (11-12)
    Login,
    LoginIncomplete,

    // Standalone scenarios (13-14)
    DelayedList,
    SearchFlow,
}

impl Scenario {
    /// Get scenario number (1-14)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::PagedList => 1,
            Scenario::SearchByName => 2,
            Scenario::SingleUser => 3,
            Scenario::UnknownUser => 4,
            Scenario::CreateUser => 5,
            Scenario::ReplaceUser => 6,
            Scenario::AmendUser => 7,
            Scenario::RemoveUser => 8,
            Scenario::Register => 9,
            Scenario::RegisterIncomplete => 10,
            Scenario::Login => 11,
            Scenario::LoginIncomplete => 12,
            Scenario::DelayedList => 13,
            Scenario::SearchFlow => 14,
        }
    }

    /// Get scenario display name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::PagedList => "Paged User List",
            Scenario::SearchByName => "Search User By Name",
            Scenario::SingleUser => "Single User",
            Scenario::UnknownUser => "Unknown User",
            Scenario::CreateUser => "Create User",
            Scenario::ReplaceUser => "Replace User (PUT)",
            Scenario::AmendUser => "Amend User (PATCH)",
            Scenario::RemoveUser => "Remove User",
            Scenario::Register => "Register",
            Scenario::RegisterIncomplete => "Register Without Password",
            Scenario::Login => "Log In",
            Scenario::LoginIncomplete => "Log In Without Password",
            Scenario::DelayedList => "Delayed User List",
            Scenario::SearchFlow => "Browser Search Flow",
        }
    }

    /// Get suite grouping
    pub fn suite(&self) -> &'static str {
        match self {
            Scenario::PagedList
            | Scenario::SearchByName
            | Scenario::SingleUser
            | Scenario::UnknownUser => "Listing",
            Scenario::CreateUser
            | Scenario::ReplaceUser
            | Scenario::AmendUser
            | Scenario::RemoveUser => "Lifecycle",
            Scenario::Register | Scenario::RegisterIncomplete => "Registration",
            Scenario::Login | Scenario::LoginIncomplete => "Login",
            Scenario::DelayedList => "Timing",
            Scenario::SearchFlow => "Browser",
        }
    }

    /// Get all scenarios in catalog order
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::PagedList,
            Scenario::SearchByName,
            Scenario::SingleUser,
            Scenario::UnknownUser,
            Scenario::CreateUser,
            Scenario::ReplaceUser,
            Scenario::AmendUser,
            Scenario::RemoveUser,
            Scenario::Register,
            Scenario::RegisterIncomplete,
            Scenario::Login,
            Scenario::LoginIncomplete,
            Scenario::DelayedList,
            Scenario::SearchFlow,
        ]
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        Scenario::all().into_iter().find(|s| s.number() == n)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl ScenarioStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ScenarioStatus::Pass => "✓",
            ScenarioStatus::Fail => "✗",
            ScenarioStatus::Skip => "○",
            ScenarioStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioStatus::Pass)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStatus::Pass => write!(f, "PASS"),
            ScenarioStatus::Fail => write!(f, "FAIL"),
            ScenarioStatus::Skip => write!(f, "SKIP"),
            ScenarioStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
}

impl ScenarioResult {
    pub fn pass(scenario: Scenario, duration_ms: u64) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Pass,
            duration_ms,
            message: None,
        }
    }

    pub fn fail(scenario: Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Fail,
            duration_ms,
            message: Some(message.into()),
        }
    }

    pub fn skip(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Skip,
            duration_ms: 0,
            message: Some(reason.into()),
        }
    }

    pub fn error(scenario: Scenario, error: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.scenario,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one verification round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub round: u32,
    pub target: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteSummary {
    pub fn new(round: u32, target: impl Into<String>, results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Fail)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Skip)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            round,
            target: target.into(),
            total,
            passed,
            failed,
            skipped,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round {} - {}", self.round, self.target)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
