use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use daybreak_common::{FilterTerm, InstanceRef, Severity};

use crate::types::{InstanceApi, Notifier};

/// Instance listing/control over the provider's HTTP API.
///
/// Endpoints:
///   POST {base}/instances/list          body: {"filters": [...]}
///   POST {base}/instances/{id}/start
#[derive(Debug, Clone)]
pub struct HttpInstanceApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    filters: &'a [FilterTerm],
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    instances: Vec<InstanceRef>,
}

impl HttpInstanceApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        let mut req = self.http.post(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl InstanceApi for HttpInstanceApi {
    async fn list(&self, filters: &[FilterTerm]) -> Result<Vec<InstanceRef>> {
        let url = format!("{}/instances/list", self.base_url);
        let resp = self
            .request(url)
            .json(&ListRequest { filters })
            .send()
            .await
            .context("instance listing request failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("instance listing returned {}", resp.status()));
        }

        let body: ListResponse = resp
            .json()
            .await
            .context("failed to decode instance listing response")?;
        Ok(body.instances)
    }

    async fn request_start(&self, id: &str) -> Result<()> {
        let url = format!("{}/instances/{}/start", self.base_url, id);
        let resp = self
            .request(url)
            .send()
            .await
            .with_context(|| format!("start request for {id} failed"))?;

        if !resp.status().is_success() {
            return Err(anyhow!("start of {id} returned {}", resp.status()));
        }
        Ok(())
    }
}

/// Notification delivery via a JSON webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct NotifyBody<'a> {
    severity: Severity,
    message: &'a str,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, severity: Severity, message: &str) -> Result<()> {
        let resp = self
            .http
            .post(&self.url)
            .json(&NotifyBody { severity, message })
            .send()
            .await
            .context("notification delivery failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("notification endpoint returned {}", resp.status()));
        }
        Ok(())
    }
}
