//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Contract verification harness for the reqres user API
#[derive(Parser, Debug)]
#[command(name = "reqres-verify")]
#[command(version)]
#[command(about = "Verify the user API contract and the browser search flow")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run verification scenarios against the remote service
    Verify(VerifyArgs),

    /// List available scenarios and suites
    List(ListArgs),

    /// View stored verification runs
    Results(ResultsArgs),
}

/// Arguments for verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Base URL of the service under verification
    #[arg(long)]
    pub base_url: Option<String>,

    /// Specific scenario number to run (1-14)
    #[arg(short, long)]
    pub scenario: Option<u8>,

    /// Run only one suite (listing, lifecycle, registration, login, timing, browser)
    #[arg(long)]
    pub suite: Option<String>,

    /// Number of verification rounds
    #[arg(short, long, default_value = "1")]
    pub rounds: u32,

    /// Run scenarios in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of concurrent scenarios (when parallel)
    #[arg(short, long, default_value = "4")]
    pub concurrent: usize,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Transport timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip specific scenarios (comma-separated numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Write formatted results to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Persist the run in the results store
    #[arg(long)]
    pub store: bool,

    /// Configuration file (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show detailed scenario information
    #[arg(short, long)]
    pub detailed: bool,

    /// Show suites only
    #[arg(short, long)]
    pub suites: bool,
}

/// Arguments for results command
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Target base URL to show runs for
    #[arg(short, long)]
    pub target: Option<String>,

    /// Show the latest run's summary
    #[arg(short, long)]
    pub summary: bool,

    /// Export the latest run to a file (format by extension: .json/.csv)
    #[arg(short, long)]
    pub export: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["reqres-verify", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_verify_args() {
        let args = Args::parse_from([
            "reqres-verify",
            "verify",
            "--base-url",
            "http://localhost:8080/api/",
            "--rounds",
            "10",
            "--parallel",
        ]);
        match args.command {
            Command::Verify(verify_args) => {
                assert_eq!(
                    verify_args.base_url.as_deref(),
                    Some("http://localhost:8080/api/")
                );
                assert_eq!(verify_args.rounds, 10);
                assert!(verify_args.parallel);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_verify_scenario_and_skip() {
        let args = Args::parse_from([
            "reqres-verify",
            "verify",
            "--scenario",
            "3",
            "--skip",
            "13,14",
        ]);
        match args.command {
            Command::Verify(verify_args) => {
                assert_eq!(verify_args.scenario, Some(3));
                assert_eq!(verify_args.skip.as_deref(), Some("13,14"));
            }
            _ => panic!("Expected Verify command"),
        }
    }
}
