//! Search page object and flow scenario
//!
//! Page objects own the locators; flow logic calls page methods and never
//! embeds a locator inline.

use tracing::{debug, info};

use crate::browser::{Driver, Element, Locator, UiError};
use crate::models::{Scenario, ScenarioResult, ScenarioStatus};
use crate::utils::Timer;

/// The search engine's landing page
pub struct SearchPage<'a> {
    driver: &'a dyn Driver,
    start_url: String,
}

impl<'a> SearchPage<'a> {
    pub fn new(driver: &'a dyn Driver, start_url: impl Into<String>) -> Self {
        Self {
            driver,
            start_url: start_url.into(),
        }
    }

    fn search_box_locator() -> Locator {
        Locator::xpath("//input[@id='searchbox_input']")
    }

    fn search_button_locator() -> Locator {
        Locator::xpath("//button[@aria-label='Search']")
    }

    fn result_link_locator(text: &str) -> Locator {
        Locator::xpath(format!("//span[normalize-space()='{text}']"))
    }

    pub async fn open(&self) -> Result<(), UiError> {
        debug!("Opening {}", self.start_url);
        self.driver.open(&self.start_url).await
    }

    /// Type a query and trigger the search
    pub async fn search(&self, query: &str) -> Result<(), UiError> {
        let search_box = self.driver.element(&Self::search_box_locator()).await?;
        search_box.set_value(query).await?;

        let search_button = self.driver.element(&Self::search_button_locator()).await?;
        search_button.click().await
    }

    /// Follow the result link carrying the given text, if it exists
    pub async fn follow_result(&self, text: &str) -> Result<bool, UiError> {
        let locator = Self::result_link_locator(text);
        let link = self.driver.element(&locator).await?;

        if !link.is_existing().await? {
            return Ok(false);
        }
        link.click().await?;
        Ok(true)
    }

    pub async fn current_url(&self) -> Result<String, UiError> {
        self.driver.current_url().await
    }
}

/// Scenario 14: open the search engine, search a known term, follow a known
/// result, and assert the final navigated URL.
#[derive(Clone, Debug)]
pub struct SearchFlow {
    pub start_url: String,
    pub query: String,
    pub result_text: String,
    pub expected_url: String,
}

impl SearchFlow {
    pub fn new(
        start_url: impl Into<String>,
        query: impl Into<String>,
        result_text: impl Into<String>,
        expected_url: impl Into<String>,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            query: query.into(),
            result_text: result_text.into(),
            expected_url: expected_url.into(),
        }
    }

    pub async fn run(&self, driver: &dyn Driver) -> anyhow::Result<ScenarioResult> {
        info!("Running {}", Scenario::SearchFlow);
        let timer = Timer::start("search flow");

        let page = SearchPage::new(driver, &self.start_url);
        page.open().await?;
        page.search(&self.query).await?;

        if !page.follow_result(&self.result_text).await? {
            return Ok(ScenarioResult::fail(
                Scenario::SearchFlow,
                timer.elapsed_ms(),
                format!("no result link with text '{}'", self.result_text),
            ));
        }

        let final_url = page.current_url().await?;
        let duration_ms = timer.elapsed_ms();

        if final_url != self.expected_url {
            return Ok(ScenarioResult::fail(
                Scenario::SearchFlow,
                duration_ms,
                format!(
                    "expected final URL {} but navigated to {}",
                    self.expected_url, final_url
                ),
            ));
        }

        Ok(ScenarioResult {
            scenario: Scenario::SearchFlow,
            status: ScenarioStatus::Pass,
            duration_ms,
            message: Some(format!("'{}' -> {}", self.query, final_url)),
        })
    }
}
