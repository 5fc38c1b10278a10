//! Batched submission of a games list.
//!
//! A submit issues up to three requests concurrently and awaits them jointly.
//! There is no ordering between them, no cancellation and no retry: the
//! first failure is returned once every request has finished.

use std::time::Duration;

use futures::future::join_all;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::game::Game;
use crate::plan::SubmitPlan;

const GAMES_PATH: &str = "api/games";

/// Configuration for [`GamesClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin (and optional path prefix) of the Tankard backend.
    pub base_url: Url,
    /// Per-request timeout; none by default.
    pub timeout: Option<Duration>,
    /// Sent as `Authorization: Bearer …` when present.
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            detail: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                detail: "not a hierarchical url".to_string(),
            });
        }
        Ok(Self {
            base_url,
            timeout: None,
            bearer_token: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Outcome of one request in a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedRequest {
    pub method: Method,
    pub status: StatusCode,
}

/// Every request a submit sent, in plan order (POST, PUT, DELETE).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub requests: Vec<SubmittedRequest>,
}

impl SubmitReport {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GamesClient {
    http: Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl GamesClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint: games_endpoint(&config.base_url)?,
            bearer_token: config.bearer_token,
        })
    }

    /// The `/api/games` URL every request targets.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the requests for a plan without sending them, in plan order.
    pub fn build_requests(&self, plan: &SubmitPlan<'_>) -> Result<Vec<Request>, ClientError> {
        let mut requests = Vec::with_capacity(plan.request_count());

        if !plan.create().is_empty() {
            debug!(records = plan.create().len(), "games batch: create");
            requests.push(self.json_request(Method::POST, plan.create())?);
        }

        if !plan.update().is_empty() {
            debug!(records = plan.update().len(), "games batch: update");
            requests.push(self.json_request(Method::PUT, plan.update())?);
        }

        if !plan.remove().is_empty() {
            debug!(records = plan.remove().len(), "games batch: remove");
            let mut url = self.endpoint.clone();
            {
                let mut query = url.query_pairs_mut();
                for id in plan.remove() {
                    query.append_pair("ids", &id.to_string());
                }
            }
            requests.push(self.authorized(self.http.delete(url)).build()?);
        }

        Ok(requests)
    }

    /// Plan, build and send the batch for `games`.
    pub async fn submit(&self, games: &[Game]) -> Result<SubmitReport, ClientError> {
        let plan = SubmitPlan::from_games(games);
        if plan.is_empty() {
            debug!(rows = games.len(), "games batch: nothing to submit");
            return Ok(SubmitReport::default());
        }

        let requests = self.build_requests(&plan)?;
        let outcomes = join_all(requests.into_iter().map(|request| self.send(request))).await;

        let mut report = SubmitReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(submitted) => report.requests.push(submitted),
                Err(e) => {
                    warn!(error = %e, "games batch failed");
                    return Err(e);
                }
            }
        }
        Ok(report)
    }

    async fn send(&self, request: Request) -> Result<SubmittedRequest, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending games request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                url,
                status,
            });
        }

        Ok(SubmittedRequest { method, status })
    }

    fn json_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        body: &T,
    ) -> Result<Request, ClientError> {
        let body = serde_json::to_vec(body)?;
        let request = self
            .authorized(self.http.request(method, self.endpoint.clone()))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()?;
        Ok(request)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }
}

fn games_endpoint(base_url: &Url) -> Result<Url, ClientError> {
    let mut base = base_url.clone();
    // Url::join drops the last segment unless the path ends in '/'
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.join(GAMES_PATH)
        .map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            detail: e.to_string(),
        })
}
