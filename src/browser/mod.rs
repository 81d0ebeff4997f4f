//! Browser-driving collaborator seam
//!
//! The harness drives a browser only through these traits; the engine behind
//! them (a WebDriver session, a devtools connection) is an external
//! collaborator and is never reached into directly. A scripted in-memory
//! implementation lives in [`script`] for exercising flow logic without an
//! engine.

pub mod page;
pub mod script;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use page::{SearchFlow, SearchPage};
pub use script::{ElementSpec, ScriptedDriver};

/// UI-driving failures
#[derive(Error, Debug)]
pub enum UiError {
    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("interaction with {locator} failed: {message}")]
    Interaction { locator: String, message: String },

    #[error("navigation failed: {0}")]
    Navigation(String),
}

/// How to locate an element on the page
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath={expr}"),
            Locator::Css(selector) => write!(f, "css={selector}"),
        }
    }
}

/// The driving engine: navigation and element lookup
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn open(&self, url: &str) -> Result<(), UiError>;

    /// Resolve an element handle for a locator
    async fn element(&self, locator: &Locator) -> Result<Box<dyn Element>, UiError>;

    /// URL of the page currently displayed
    async fn current_url(&self) -> Result<String, UiError>;
}

/// An element handle: the only interactions scenario logic may perform
#[async_trait]
pub trait Element: Send + Sync {
    async fn set_value(&self, text: &str) -> Result<(), UiError>;

    async fn click(&self) -> Result<(), UiError>;

    async fn is_existing(&self) -> Result<bool, UiError>;

    async fn text(&self) -> Result<String, UiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display() {
        let by_xpath = Locator::xpath("//input[@id='searchbox_input']");
        assert_eq!(by_xpath.to_string(), "xpath=//input[@id='searchbox_input']");

        let by_css = Locator::css("#results a");
        assert_eq!(by_css.to_string(), "css=#results a");
    }
}
