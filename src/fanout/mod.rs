//! Concurrent request fan-out
//!
//! Dispatches a group of independent requests at once and hands back outcomes
//! in the caller-supplied order. Results are collected into a pre-allocated
//! slot per request index as completions arrive, so transport completion order
//! never leaks into result order.

use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tracing::debug;

use crate::http::{ApiClient, ApiError, ApiRequest, ApiResponse};

/// A fan-out group failure, reported against the failing input index.
#[derive(Error, Debug)]
#[error("request {index} in fan-out group failed: {source}")]
pub struct FanOutError {
    pub index: usize,
    #[source]
    pub source: ApiError,
}

/// Dispatch all requests concurrently and wait for every one to settle.
///
/// `result[i]` is the outcome of `requests[i]`. Every dispatched request
/// yields exactly one outcome; the run completes only once every slot holds
/// one.
pub async fn fan_out(
    client: &ApiClient,
    requests: Vec<ApiRequest>,
) -> Vec<Result<ApiResponse, ApiError>> {
    let mut slots: Vec<Option<Result<ApiResponse, ApiError>>> =
        (0..requests.len()).map(|_| None).collect();

    let mut in_flight: FuturesUnordered<_> = requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| async move { (index, client.send(&request).await) })
        .collect();

    while let Some((index, outcome)) = in_flight.next().await {
        debug!("Fan-out request {} settled", index);
        slots[index] = Some(outcome);
    }

    slots
        .into_iter()
        .map(|slot| slot.expect("every dispatched request settles exactly once"))
        .collect()
}

/// Fan out and require every request in the group to succeed at the transport
/// level.
///
/// The whole group fails with the lowest failing input index. There is no
/// partial-success surface; callers that tolerate individual failures use
/// [`fan_out`] directly.
pub async fn fan_out_all(
    client: &ApiClient,
    requests: Vec<ApiRequest>,
) -> Result<Vec<ApiResponse>, FanOutError> {
    let outcomes = fan_out(client, requests).await;

    let mut responses = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(response) => responses.push(response),
            Err(source) => return Err(FanOutError { index, source }),
        }
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn page_mock(server: &MockServer, page: u32, delay_ms: u64) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(delay_ms))
                    .set_body_json(json!({ "page": page })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_results_follow_input_order_not_completion_order() {
        let server = MockServer::start().await;
        // The first request is made much slower than the second, so the
        // second completes first and would surface first under naive
        // first-resolved-first-processed collection.
        page_mock(&server, 1, 300).await;
        page_mock(&server, 2, 0).await;

        let client = ApiClient::new(server.uri()).unwrap();
        let requests = vec![
            ApiRequest::get("users").query("page", "1"),
            ApiRequest::get("users").query("page", "2"),
        ];

        let responses = fan_out_all(&client, requests).await.unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].json().unwrap()["page"], 1);
        assert_eq!(responses[1].json().unwrap()["page"], 2);
    }

    #[tokio::test]
    async fn test_group_size_is_preserved() {
        let server = MockServer::start().await;
        for page in 1..=4 {
            page_mock(&server, page, (4 - page as u64) * 50).await;
        }

        let client = ApiClient::new(server.uri()).unwrap();
        let requests: Vec<_> = (1..=4)
            .map(|p: u32| ApiRequest::get("users").query("page", p.to_string()))
            .collect();

        let outcomes = fan_out(&client, requests).await;
        assert_eq!(outcomes.len(), 4);
        for (i, outcome) in outcomes.iter().enumerate() {
            let body = outcome.as_ref().unwrap().json().unwrap();
            assert_eq!(body["page"], i as u64 + 1);
        }
    }

    #[tokio::test]
    async fn test_single_failure_fails_the_group() {
        let server = MockServer::start().await;
        page_mock(&server, 1, 0).await;

        let good = ApiClient::new(server.uri()).unwrap();
        // Point the second request at a dead port via an absolute URL.
        let requests = vec![
            ApiRequest::get("users").query("page", "1"),
            ApiRequest::get("http://127.0.0.1:1/users"),
        ];

        let err = fan_out_all(&good, requests).await.unwrap_err();
        assert_eq!(err.index, 1);
    }

    #[tokio::test]
    async fn test_empty_group() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri()).unwrap();
        let responses = fan_out_all(&client, Vec::new()).await.unwrap();
        assert!(responses.is_empty());
    }
}
