//! Listing scenarios
//!
//! Scenarios 1-4: paged listing, search by name, single user, unknown user.

#![allow(dead_code)]

use anyhow::Result;
use tracing::{debug, info};

use crate::contract::{page, Expect, ExpectFailure};
use crate::fanout;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Scenario, ScenarioResult};
use crate::utils::Timer;

/// Scenario 1: fetch several listing pages concurrently.
///
/// All pages go out as one fan-out group; every page must come back 200 with
/// the declared pagination values, and the page number echoed in the payload
/// must match the requested page at the same input index.
#[derive(Clone, Debug)]
pub struct PagedListScenario {
    pub pages: Vec<u64>,
    pub per_page: u64,
    pub total: u64,
}

impl PagedListScenario {
    pub fn new() -> Self {
        Self {
            pages: vec![1, 2],
            per_page: 6,
            total: 12,
        }
    }

    pub fn pages(mut self, pages: Vec<u64>) -> Self {
        self.pages = pages;
        self
    }

    pub fn expect_totals(mut self, per_page: u64, total: u64) -> Self {
        self.per_page = per_page;
        self.total = total;
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::PagedList);
        let timer = Timer::start("paged list");

        let requests: Vec<ApiRequest> = self
            .pages
            .iter()
            .map(|p| ApiRequest::get("users").query("page", p.to_string()))
            .collect();

        let responses = fanout::fan_out_all(client, requests).await?;

        let mut all_passed = true;
        let mut details = Vec::new();

        for (i, response) in responses.iter().enumerate() {
            let expected_page = self.pages[i];
            debug!("Checking page {}", expected_page);

            let expect = Expect::status(200)
                .field_eq("page", expected_page)
                .field_eq("per_page", self.per_page)
                .field_eq("total", self.total)
                .array_len("data", self.per_page as usize);

            let outcome = expect
                .verify(response)
                .and_then(|()| page::parse(response).and_then(|p| page::consistent(&p)));

            match outcome {
                Ok(()) => details.push(format!(
                    "✓ page {} ({}ms)",
                    expected_page,
                    response.duration_ms().unwrap_or(0)
                )),
                Err(violation) => {
                    all_passed = false;
                    details.push(format!("✗ page {expected_page}: {violation}"));
                }
            }
        }

        let duration_ms = timer.elapsed_ms();
        let result = if all_passed {
            ScenarioResult::pass(Scenario::PagedList, duration_ms)
                .with_message(details.join("\n"))
        } else {
            ScenarioResult::fail(Scenario::PagedList, duration_ms, details.join("\n"))
        };

        Ok(result)
    }
}

impl Default for PagedListScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 2: locate a user by first name on a known page
#[derive(Clone, Debug)]
pub struct SearchByNameScenario {
    pub page: u64,
    pub first_name: String,
    pub last_name: String,
}

impl SearchByNameScenario {
    pub fn new() -> Self {
        Self {
            page: 2,
            first_name: "Lindsay".to_string(),
            last_name: "Ferguson".to_string(),
        }
    }

    pub fn expect_user(
        mut self,
        page: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.page = page;
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::SearchByName);
        let timer = Timer::start("search by name");

        let response = client
            .get_query("users", &[("page", &self.page.to_string())])
            .await?;
        let duration_ms = timer.elapsed_ms();

        if let Err(violation) = Expect::status(200).verify(&response) {
            return Ok(ScenarioResult::fail(
                Scenario::SearchByName,
                duration_ms,
                violation.to_string(),
            ));
        }

        let listing = match page::parse(&response) {
            Ok(listing) => listing,
            Err(violation) => {
                return Ok(ScenarioResult::fail(
                    Scenario::SearchByName,
                    duration_ms,
                    violation.to_string(),
                ))
            }
        };

        let result = match listing.find_by_first_name(&self.first_name) {
            Some(user) if user.last_name == self.last_name => {
                ScenarioResult::pass(Scenario::SearchByName, duration_ms).with_message(format!(
                    "✓ {} {} found on page {}",
                    user.first_name, user.last_name, self.page
                ))
            }
            Some(user) => ScenarioResult::fail(
                Scenario::SearchByName,
                duration_ms,
                format!(
                    "{} found but last_name expected {} and got {}",
                    self.first_name, self.last_name, user.last_name
                ),
            ),
            None => ScenarioResult::fail(
                Scenario::SearchByName,
                duration_ms,
                format!("no user named {} on page {}", self.first_name, self.page),
            ),
        };

        Ok(result)
    }
}

impl Default for SearchByNameScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 3: fetch one user by id and verify identity fields.
///
/// The fetch is issued twice; the payload must be identical across reads
/// (reads are idempotent absent external mutation).
#[derive(Clone, Debug)]
pub struct SingleUserScenario {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl SingleUserScenario {
    pub fn new() -> Self {
        Self {
            id: 2,
            email: "janet.weaver@reqres.in".to_string(),
            first_name: "Janet".to_string(),
            last_name: "Weaver".to_string(),
        }
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::SingleUser);
        let timer = Timer::start("single user");
        let path = format!("users/{}", self.id);

        let first = client.get(&path).await?;
        let duration_ms = timer.elapsed_ms();

        let expect = Expect::status(200)
            .field_eq("data.id", self.id)
            .field_eq("data.email", self.email.as_str())
            .field_eq("data.first_name", self.first_name.as_str())
            .field_eq("data.last_name", self.last_name.as_str());

        if let Err(violation) = expect.verify(&first) {
            return Ok(ScenarioResult::fail(
                Scenario::SingleUser,
                duration_ms,
                violation.to_string(),
            ));
        }

        let second = client.get(&path).await?;
        if first.json()?["data"] != second.json()?["data"] {
            return Ok(ScenarioResult::fail(
                Scenario::SingleUser,
                timer.elapsed_ms(),
                "repeated read returned a different payload",
            ));
        }

        Ok(
            ScenarioResult::pass(Scenario::SingleUser, timer.elapsed_ms()).with_message(format!(
                "✓ user {} is {} {}",
                self.id, self.first_name, self.last_name
            )),
        )
    }
}

impl Default for SingleUserScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 4: an unknown id must yield 404, a first-class expected outcome
#[derive(Clone, Debug)]
pub struct UnknownUserScenario {
    pub id: u64,
}

impl UnknownUserScenario {
    pub fn new() -> Self {
        Self { id: 99 }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::UnknownUser);
        let timer = Timer::start("unknown user");

        let response = client.get(&format!("users/{}", self.id)).await?;
        let duration_ms = timer.elapsed_ms();

        let result = match ExpectFailure::status(404).verify(&response) {
            Ok(()) => ScenarioResult::pass(Scenario::UnknownUser, duration_ms)
                .with_message(format!("✓ user {} not found", self.id)),
            Err(violation) => {
                ScenarioResult::fail(Scenario::UnknownUser, duration_ms, violation.to_string())
            }
        };

        Ok(result)
    }
}

impl Default for UnknownUserScenario {
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

    fn user(id: u64, email: &str, first: &str, last: &str) -> serde_json::Value {
        json!({"id": id, "email": email, "first_name": first, "last_name": last, "avatar": ""})
    }

    fn page_body(page: u64) -> serde_json::Value {
        let data: Vec<_> = (0..6)
            .map(|i| {
                let id = (page - 1) * 6 + i + 1;
                user(
                    id,
                    &format!("user{id}@reqres.in"),
                    if id == 8 { "Lindsay" } else { "George" },
                    if id == 8 { "Ferguson" } else { "Bluth" },
                )
            })
            .collect();
        json!({"page": page, "per_page": 6, "total": 12, "total_pages": 2, "data": data})
    }

    async fn mount_page(server: &MockServer, page: u64) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(page)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_paged_list_passes() {
        let server = MockServer::start().await;
        mount_page(&server, 1).await;
        mount_page(&server, 2).await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = PagedListScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_paged_list_reports_wrong_per_page() {
        let server = MockServer::start().await;
        mount_page(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"page": 2, "per_page": 5, "total": 12, "total_pages": 2, "data": []}),
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = PagedListScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
        assert!(result.message.unwrap().contains("per_page"));
    }

    #[tokio::test]
    async fn test_search_by_name_finds_lindsay() {
        let server = MockServer::start().await;
        mount_page(&server, 2).await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = SearchByNameScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_search_by_name_reports_absence() {
        let server = MockServer::start().await;
        mount_page(&server, 2).await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = SearchByNameScenario::new()
            .expect_user(2, "Gob", "Bluth")
            .run(&client)
            .await
            .unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
    }

    #[tokio::test]
    async fn test_single_user_passes_and_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": user(2, "janet.weaver@reqres.in", "Janet", "Weaver")}),
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = SingleUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_single_user_field_mismatch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": user(2, "someone.else@reqres.in", "Janet", "Weaver")}),
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = SingleUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
        assert!(result.message.unwrap().contains("data.email"));
    }

    #[tokio::test]
    async fn test_unknown_user_expects_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = UnknownUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[tokio::test]
    async fn test_unknown_user_rejects_unexpected_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": user(99, "x@reqres.in", "X", "Y")})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = UnknownUserScenario::new().run(&client).await.unwrap();

        assert_eq!(result.status, ScenarioStatus::Fail);
    }
}
