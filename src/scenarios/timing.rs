//! Timing scenario
//!
//! Scenario 13: the service honors an artificial server-side delay, so the
//! observed round-trip must be at least that long. The bound is
//! one-directional; network variance sets no ceiling.

#![allow(dead_code)]

use anyhow::Result;
use std::time::Duration;
use tracing::info;

use crate::contract::Expect;
use crate::http::ApiClient;
use crate::models::{Scenario, ScenarioResult};
use crate::utils::Timer;

/// Scenario 13: delayed user list
#[derive(Clone, Debug)]
pub struct DelayedListScenario {
    pub delay_secs: u64,
    pub per_page: u64,
    pub total: u64,
}

impl DelayedListScenario {
    pub fn new() -> Self {
        Self {
            delay_secs: 3,
            per_page: 6,
            total: 12,
        }
    }

    pub fn delay_secs(mut self, delay_secs: u64) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!(
            "Running {} (delay {}s)",
            Scenario::DelayedList,
            self.delay_secs
        );
        let timer = Timer::start("delayed list");

        let response = client
            .get_query("users", &[("delay", &self.delay_secs.to_string())])
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200)
            .field_eq("page", 1u64)
            .field_eq("per_page", self.per_page)
            .field_eq("total", self.total)
            .array_len("data", self.per_page as usize)
            .min_duration(Duration::from_secs(self.delay_secs));

        let result = match expect.verify(&response) {
            Ok(()) => {
                ScenarioResult::pass(Scenario::DelayedList, duration_ms).with_message(format!(
                    "✓ responded in {}ms with a {}s delay requested",
                    response.duration_ms().unwrap_or(0),
                    self.delay_secs
                ))
            }
            Err(violation) => {
                ScenarioResult::fail(Scenario::DelayedList, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for DelayedListScenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScenarioStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_body() -> serde_json::Value {
        let data: Vec<_> = (1..=6)
            .map(|id| {
                json!({
                    "id": id,
                    "email": format!("user{id}@reqres.in"),
                    "first_name": format!("First{id}"),
                    "last_name": format!("Last{id}"),
                })
            })
            .collect();
        json!({"page": 1, "per_page": 6, "total": 12, "total_pages": 2, "data": data})
    }

    #[tokio::test]
    async fn test_delayed_list_passes_when_delay_is_honored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("delay", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(1100))
                    .set_body_json(listing_body()),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = DelayedListScenario::new()
            .delay_secs(1)
            .run(&client)
            .await
            .unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_delayed_list_fails_when_response_is_too_fast() {
        let server = MockServer::start().await;
        // The mock ignores the delay parameter and answers immediately.
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("delay", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = DelayedListScenario::new()
            .delay_secs(2)
            .run(&client)
            .await
            .unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
        assert!(result.message.unwrap().contains("below the requested delay"));
    }
}
