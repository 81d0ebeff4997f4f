//! Registration and login scenarios
//!
//! Scenarios 9-12. The missing-password variants are expected failures with a
//! fixed error string; a 2xx from the service there is a contract violation.

#![allow(dead_code)]

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::contract::{Expect, ExpectFailure};
use crate::http::ApiClient;
use crate::models::{Scenario, ScenarioResult};
use crate::utils::Timer;

const MISSING_PASSWORD: &str = "Missing password";

/// Scenario 9: register with full credentials
#[derive(Clone, Debug)]
pub struct RegisterScenario {
    pub email: String,
    pub password: String,
}

impl RegisterScenario {
    pub fn new() -> Self {
        Self {
            email: "eve.holt@reqres.in".to_string(),
            password: "pistol".to_string(),
        }
    }

    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::Register);
        let timer = Timer::start("register");

        let response = client
            .post_json(
                "register",
                json!({"email": self.email, "password": self.password}),
            )
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200)
            .field_present("id")
            .non_empty_string("token");

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::Register, duration_ms)
                .with_message(format!("✓ registered {}", self.email)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::Register, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for RegisterScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 10: register without a password, expecting the fixed error
#[derive(Clone, Debug)]
pub struct RegisterIncompleteScenario {
    pub email: String,
}

impl RegisterIncompleteScenario {
    pub fn new() -> Self {
        Self {
            email: "sydney@fife".to_string(),
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::RegisterIncomplete);
        let timer = Timer::start("register incomplete");

        let response = client
            .post_json("register", json!({"email": self.email}))
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = ExpectFailure::status(400).error_message(MISSING_PASSWORD);

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::RegisterIncomplete, duration_ms)
                .with_message(format!("✓ rejected with '{MISSING_PASSWORD}'")),
            Err(violation) => ScenarioResult::fail(
                Scenario::RegisterIncomplete,
                duration_ms,
                violation.to_string(),
            ),
        };

        Ok(result)
    }
}

impl Default for RegisterIncompleteScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 11: log in with full credentials
#[derive(Clone, Debug)]
pub struct LoginScenario {
    pub email: String,
    pub password: String,
}

impl LoginScenario {
    pub fn new() -> Self {
        Self {
            email: "eve.holt@reqres.in".to_string(),
            password: "cityslicka".to_string(),
        }
    }

    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::Login);
        let timer = Timer::start("login");

        let response = client
            .post_json(
                "login",
                json!({"email": self.email, "password": self.password}),
            )
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200).non_empty_string("token");

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::Login, duration_ms)
                .with_message(format!("✓ logged in as {}", self.email)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::Login, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for LoginScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 12: log in without a password, expecting the fixed error
#[derive(Clone, Debug)]
pub struct LoginIncompleteScenario {
    pub email: String,
}

impl LoginIncompleteScenario {
    pub fn new() -> Self {
        Self {
            email: "peter@klaven".to_string(),
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::LoginIncomplete);
        let timer = Timer::start("login incomplete");

        let response = client
            .post_json("login", json!({"email": self.email}))
            .await?;
        let duration_ms = timer.elapsed_ms();

        let expect = ExpectFailure::status(400).error_message(MISSING_PASSWORD);

        let result = match expect.verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::LoginIncomplete, duration_ms)
                .with_message(format!("✓ rejected with '{MISSING_PASSWORD}'")),
            Err(violation) => ScenarioResult::fail(
                Scenario::LoginIncomplete,
                duration_ms,
                violation.to_string(),
            ),
        };

        Ok(result)
    }
}

impl Default for LoginIncompleteScenario {
    fn default() -> Self {
        Self::new()
    }
}
