//! Results storage module
//!
//! Provides persistent storage and export for verification runs.

mod storage;

pub use storage::{ExportFormat, ResultsStorage, RunConfig, RunInfo, StoredRun};
