//! Verification scenario implementations
//!
//! Each scenario declares its endpoint contract and runs it against the
//! remote service through an explicit [`ScenarioContext`]; there are no
//! shared client or browser singletons.
//!
//! ## Suites
//!
//! ### Listing (1-4)
//! - Paged User List (concurrent pages 1 and 2)
//! - Search User By Name
//! - Single User
//! - Unknown User
//!
//! ### Lifecycle (5-8)
//! - Create / Replace / Amend / Remove against a fixed sandbox id
//!
//! ### Registration and Login (9-12)
//! - Success plus missing-password failure contracts
//!
//! ### Standalone (13-14)
//! - Delayed User List (timing bound)
//! - Browser Search Flow (requires an attached driver)

mod auth;
mod crud;
mod listing;
mod timing;

pub use auth::{LoginIncompleteScenario, LoginScenario, RegisterIncompleteScenario, RegisterScenario};
pub use crud::{AmendUserScenario, CreateUserScenario, RemoveUserScenario, ReplaceUserScenario};
pub use listing::{PagedListScenario, SearchByNameScenario, SingleUserScenario, UnknownUserScenario};
pub use timing::DelayedListScenario;

use anyhow::Result;
use std::sync::Arc;

use crate::browser::{Driver, SearchFlow};
use crate::config::FlowConfig;
use crate::http::ApiClient;
use crate::models::{Scenario, ScenarioResult};

/// Everything a scenario may touch, passed in explicitly
#[derive(Clone)]
pub struct ScenarioContext {
    pub client: ApiClient,
    pub driver: Option<Arc<dyn Driver>>,
    pub flow: FlowConfig,
}

impl ScenarioContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            driver: None,
            flow: FlowConfig::default(),
        }
    }

    /// Attach a browser driver for the search flow scenario
    pub fn with_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn with_flow(mut self, flow: FlowConfig) -> Self {
        self.flow = flow;
        self
    }
}

/// Run a single scenario with its default contract
pub async fn run_scenario(scenario: Scenario, ctx: &ScenarioContext) -> Result<ScenarioResult> {
    let client = &ctx.client;

    match scenario {
        Scenario::PagedList => PagedListScenario::new().run(client).await,
        Scenario::SearchByName => SearchByNameScenario::new().run(client).await,
        Scenario::SingleUser => SingleUserScenario::new().run(client).await,
        Scenario::UnknownUser => UnknownUserScenario::new().run(client).await,
        Scenario::CreateUser => CreateUserScenario::new().run(client).await,
        Scenario::ReplaceUser => ReplaceUserScenario::new().run(client).await,
        Scenario::AmendUser => AmendUserScenario::new().run(client).await,
        Scenario::RemoveUser => RemoveUserScenario::new().run(client).await,
        Scenario::Register => RegisterScenario::new().run(client).await,
        Scenario::RegisterIncomplete => RegisterIncompleteScenario::new().run(client).await,
        Scenario::Login => LoginScenario::new().run(client).await,
        Scenario::LoginIncomplete => LoginIncompleteScenario::new().run(client).await,
        Scenario::DelayedList => DelayedListScenario::new().run(client).await,
        Scenario::SearchFlow => match &ctx.driver {
            Some(driver) => {
                let flow = SearchFlow::new(
                    &ctx.flow.start_url,
                    &ctx.flow.query,
                    &ctx.flow.result_text,
                    &ctx.flow.expected_url,
                );
                flow.run(driver.as_ref()).await
            }
            None => Ok(ScenarioResult::skip(
                Scenario::SearchFlow,
                "no browser driver attached",
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{ElementSpec, Locator, ScriptedDriver};
    use crate::models::ScenarioStatus;

    #[tokio::test]
    async fn test_search_flow_runs_through_injected_driver() {
        let flow = FlowConfig::default();
        let driver = ScriptedDriver::new()
            .with_element(
                Locator::xpath("//input[@id='searchbox_input']"),
                ElementSpec::input(),
            )
            .with_element(
                Locator::xpath("//button[@aria-label='Search']"),
                ElementSpec::button(),
            )
            .with_element(
                Locator::xpath(format!("//span[normalize-space()='{}']", flow.result_text)),
                ElementSpec::link(flow.expected_url.clone()),
            );

        // The API client is never touched by the browser scenario.
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let ctx = ScenarioContext::new(client)
            .with_driver(Arc::new(driver))
            .with_flow(flow);

        let result = run_scenario(Scenario::SearchFlow, &ctx).await.unwrap();
        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_search_flow_skips_when_no_driver() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let ctx = ScenarioContext::new(client);

        let result = run_scenario(Scenario::SearchFlow, &ctx).await.unwrap();
        assert_eq!(result.status, ScenarioStatus::Skip);
    }
}
