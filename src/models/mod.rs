//! Data models for contract verification
//!
//! This module contains the scenario catalog, result types, and the typed
//! payloads of the user API.

mod api;
mod scenario;

pub use api::{User, UserPage};
pub use scenario::{Scenario, ScenarioResult, ScenarioStatus, SuiteSummary};
