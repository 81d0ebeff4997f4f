//! HTTP client module for contract verification
//!
//! Provides the instrumented HTTP client used to exercise the remote user API.

mod client;
pub mod instrument;

pub use client::{ApiClient, ApiError, ApiRequest, ApiResponse};
