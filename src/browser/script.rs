//! Scripted in-memory driver
//!
//! Implements the driving seam against a fixed script instead of a real
//! engine: elements are declared up front, clicking a link element navigates
//! to its scripted destination. Used to exercise flow logic deterministically.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::browser::{Driver, Element, Locator, UiError};

/// Scripted behavior of one element
#[derive(Clone, Debug)]
pub struct ElementSpec {
    pub exists: bool,
    pub text: String,
    pub navigates_to: Option<String>,
}

impl ElementSpec {
    /// A text input that accepts values
    pub fn input() -> Self {
        Self {
            exists: true,
            text: String::new(),
            navigates_to: None,
        }
    }

    /// A clickable control that stays on the current page
    pub fn button() -> Self {
        Self {
            exists: true,
            text: String::new(),
            navigates_to: None,
        }
    }

    /// A clickable link that navigates to `destination`
    pub fn link(destination: impl Into<String>) -> Self {
        Self {
            exists: true,
            text: String::new(),
            navigates_to: Some(destination.into()),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Default)]
struct State {
    current_url: Option<String>,
    typed: Vec<String>,
    clicked: Vec<String>,
}

/// Driver over a fixed element script
pub struct ScriptedDriver {
    state: Arc<Mutex<State>>,
    elements: HashMap<String, ElementSpec>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            elements: HashMap::new(),
        }
    }

    /// Declare an element at the given locator
    pub fn with_element(mut self, locator: Locator, spec: ElementSpec) -> Self {
        self.elements.insert(locator.to_string(), spec);
        self
    }

    /// Values typed into inputs so far, in order
    pub fn typed_values(&self) -> Vec<String> {
        self.state.lock().expect("driver state lock").typed.clone()
    }

    /// Locators clicked so far, in order
    pub fn clicked(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("driver state lock")
            .clicked
            .clone()
    }
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn open(&self, url: &str) -> Result<(), UiError> {
        let mut state = self.state.lock().expect("driver state lock");
        state.current_url = Some(url.to_string());
        Ok(())
    }

    async fn element(&self, locator: &Locator) -> Result<Box<dyn Element>, UiError> {
        let key = locator.to_string();
        // Unscripted locators resolve to a handle that reports non-existence,
        // matching how a real engine resolves a selector that matches nothing.
        let spec = self.elements.get(&key).cloned().unwrap_or(ElementSpec {
            exists: false,
            text: String::new(),
            navigates_to: None,
        });

        Ok(Box::new(ScriptedElement {
            locator: key,
            spec,
            state: Arc::clone(&self.state),
        }))
    }

    async fn current_url(&self) -> Result<String, UiError> {
        self.state
            .lock()
            .expect("driver state lock")
            .current_url
            .clone()
            .ok_or_else(|| UiError::Navigation("no page has been opened".to_string()))
    }
}

struct ScriptedElement {
    locator: String,
    spec: ElementSpec,
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl Element for ScriptedElement {
    async fn set_value(&self, text: &str) -> Result<(), UiError> {
        if !self.spec.exists {
            return Err(UiError::Interaction {
                locator: self.locator.clone(),
                message: "element does not exist".to_string(),
            });
        }
        let mut state = self.state.lock().expect("driver state lock");
        state.typed.push(text.to_string());
        Ok(())
    }

    async fn click(&self) -> Result<(), UiError> {
        if !self.spec.exists {
            return Err(UiError::Interaction {
                locator: self.locator.clone(),
                message: "element does not exist".to_string(),
            });
        }
        let mut state = self.state.lock().expect("driver state lock");
        state.clicked.push(self.locator.clone());
        if let Some(destination) = &self.spec.navigates_to {
            state.current_url = Some(destination.clone());
        }
        Ok(())
    }

    async fn is_existing(&self) -> Result<bool, UiError> {
        Ok(self.spec.exists)
    }

    async fn text(&self) -> Result<String, UiError> {
        if !self.spec.exists {
            return Err(UiError::ElementNotFound {
                locator: self.locator.clone(),
            });
        }
        Ok(self.spec.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_sets_current_url() {
        let driver = ScriptedDriver::new();
        driver.open("https://duckduckgo.com/").await.unwrap();
        assert_eq!(driver.current_url().await.unwrap(), "https://duckduckgo.com/");
    }

    #[tokio::test]
    async fn test_current_url_before_open_is_an_error() {
        let driver = ScriptedDriver::new();
        assert!(driver.current_url().await.is_err());
    }

    #[tokio::test]
    async fn test_link_click_navigates() {
        let locator = Locator::css("a.result");
        let driver = ScriptedDriver::new()
            .with_element(locator.clone(), ElementSpec::link("https://www.toptal.com/"));

        driver.open("https://duckduckgo.com/").await.unwrap();
        let link = driver.element(&locator).await.unwrap();
        assert!(link.is_existing().await.unwrap());
        link.click().await.unwrap();

        assert_eq!(driver.current_url().await.unwrap(), "https://www.toptal.com/");
        assert_eq!(driver.clicked(), vec![locator.to_string()]);
    }

    #[tokio::test]
    async fn test_unscripted_element_reports_missing() {
        let driver = ScriptedDriver::new();
        let element = driver.element(&Locator::css("#nope")).await.unwrap();

        assert!(!element.is_existing().await.unwrap());
        assert!(element.click().await.is_err());
        assert!(element.text().await.is_err());
    }

    #[tokio::test]
    async fn test_element_text() {
        let locator = Locator::css("#flash");
        let driver = ScriptedDriver::new().with_element(
            locator.clone(),
            ElementSpec::button().with_text("You logged into a secure area!"),
        );

        let element = driver.element(&locator).await.unwrap();
        assert_eq!(
            element.text().await.unwrap(),
            "You logged into a secure area!"
        );
    }
}
