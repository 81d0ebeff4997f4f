//! Lifecycle scenarios
//!
//! Scenarios 5-8: create, replace, amend, remove. The sandbox service echoes
//! writes without persisting them, so every scenario targets the fixed
//! pre-existing id rather than threading a created id forward.

#![allow(dead_code)]

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::contract::Expect;
use crate::http::ApiClient;
use crate::models::{Scenario, ScenarioResult};
use crate::utils::Timer;

/// The pre-existing sandbox user all mutating scenarios address.
const SANDBOX_USER_ID: u64 = 2;

/// Scenario 5: create a user and verify the echoed payload
#[derive(Clone, Debug)]
pub struct CreateUserScenario {
    pub name: String,
    pub job: String,
}

impl CreateUserScenario {
    pub fn new() -> Self {
        Self {
            name: "morpheus".to_string(),
            job: "test lead".to_string(),
        }
    }

    pub fn user(mut self, name: impl Into<String>, job: impl Into<String>) -> Self {
        self.name = name.into();
        self.job = job.into();
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::CreateUser);
        let timer = Timer::start("create user");

        let response = client
            .post_json("users", json!({"name": self.name, "job": self.job}))
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(201)
            .field_eq("name", self.name.as_str())
            .field_eq("job", self.job.as_str())
            .field_present("id")
            .field_present("createdAt");

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::CreateUser, duration_ms)
                .with_message(format!("✓ created {} ({})", self.name, self.job)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::CreateUser, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for CreateUserScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 6: replace the sandbox user via PUT
#[derive(Clone, Debug)]
pub struct ReplaceUserScenario {
    pub id: u64,
    pub name: String,
    pub job: String,
}

impl ReplaceUserScenario {
    pub fn new() -> Self {
        Self {
            id: SANDBOX_USER_ID,
            name: "morpheus".to_string(),
            job: "Test engineer".to_string(),
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::ReplaceUser);
        let timer = Timer::start("replace user");

        let response = client
            .put_json(
                &format!("users/{}", self.id),
                json!({"name": self.name, "job": self.job}),
            )
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200)
            .field_eq("name", self.name.as_str())
            .field_eq("job", self.job.as_str())
            .field_present("updatedAt");

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::ReplaceUser, duration_ms)
                .with_message(format!("✓ user {} is now {}", self.id, self.job)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::ReplaceUser, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for ReplaceUserScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 7: amend the sandbox user via PATCH
#[derive(Clone, Debug)]
pub struct AmendUserScenario {
    pub id: u64,
    pub name: String,
    pub job: String,
}

impl AmendUserScenario {
    pub fn new() -> Self {
        Self {
            id: SANDBOX_USER_ID,
            name: "morpheus".to_string(),
            job: "QA engineer".to_string(),
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::AmendUser);
        let timer = Timer::start("amend user");

        let response = client
            .patch_json(
                &format!("users/{}", self.id),
                json!({"name": self.name, "job": self.job}),
            )
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200)
            .field_eq("name", self.name.as_str())
            .field_eq("job", self.job.as_str())
            .field_present("updatedAt");

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::AmendUser, duration_ms)
                .with_message(format!("✓ user {} is now {}", self.id, self.job)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::AmendUser, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for AmendUserScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 8: remove the sandbox user, expecting an empty 204
#[derive(Clone, Debug)]
pub struct RemoveUserScenario {
    pub id: u64,
}

impl RemoveUserScenario {
    pub fn new() -> Self {
        Self {
            id: SANDBOX_USER_ID,
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::RemoveUser);
        let timer = Timer::start("remove user");

        let response = client.delete(&format!("users/{}", self.id)).await?;
        let duration_ms = timer.elapsed_ms();

        let result = match Expect::status(204).verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::RemoveUser, duration_ms)
                .with_message(format!("✓ user {} removed", self.id)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::RemoveUser, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for RemoveUserScenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScenarioStatus;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_user_passes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_partial_json(
                json!({"name": "morpheus", "job": "test lead"}),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "name": "morpheus",
                "job": "test lead",
                "id": "142",
                "createdAt": "2026-08-08T10:00:00.000Z"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = CreateUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_create_user_missing_created_at_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"name": "morpheus", "job": "test lead", "id": "142"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = CreateUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
        assert!(result.message.unwrap().contains("createdAt"));
    }

    #[tokio::test]
    async fn test_replace_user_passes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "morpheus",
                "job": "Test engineer",
                "updatedAt": "2026-08-08T10:00:00.000Z"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = ReplaceUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_amend_user_passes() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "morpheus",
                "job": "QA engineer",
                "updatedAt": "2026-08-08T10:00:00.000Z"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = AmendUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_remove_user_expects_204() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = RemoveUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_remove_user_wrong_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = RemoveUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
    }
}
