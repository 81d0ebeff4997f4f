//! Configuration module
//!
//! Handles loading and managing configuration.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the user API under verification
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Enable parallel execution by default
    pub parallel: bool,

    /// Maximum concurrent scenarios
    pub max_concurrent: usize,

    /// Browser search flow configuration
    pub flow: FlowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reqres.in/api/".to_string(),
            timeout_secs: 30,
            parallel: false,
            max_concurrent: 4,
            flow: FlowConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if is_yaml(path.as_ref()) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

/// Browser search flow configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Search engine landing page
    pub start_url: String,

    /// Query term to type
    pub query: String,

    /// Visible text of the result link to follow
    pub result_text: String,

    /// Final URL the flow must land on
    pub expected_url: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            start_url: "https://duckduckgo.com/".to_string(),
            query: "toptal".to_string(),
            result_text: "Toptal - Hire Freelance Talent from the Top 3%".to_string(),
            expected_url: "https://www.toptal.com/".to_string(),
        }
    }
}
