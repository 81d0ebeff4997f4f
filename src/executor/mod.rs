//! Scenario execution engine
//!
//! Provides sequential and parallel scenario execution capabilities.

mod parallel;
mod runner;

pub use parallel::{AggregateResult, BatchRunner, ParallelExecutor, ScenarioStats};
pub use runner::ScenarioRunner;
