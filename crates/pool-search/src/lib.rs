use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://factory.macrofab.com/part/search";

/// Form body of a search request.
///
/// The API takes every field as a string, including `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub house: String,
    pub class: String,
    pub limit: String,
}

impl SearchQuery {
    /// All house parts of one class.
    pub fn house_parts(class: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            house: "1".to_string(),
            class: class.into(),
            limit: "1000".to_string(),
        }
    }
}

pub struct SearchClient {
    endpoint: String,
    client: Client,
}

impl SearchClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Run a search and return the decoded JSON body untouched.
    pub fn search(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        log::debug!("POST {} class={}", self.endpoint, query.class);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(query)
            .send()
            .with_context(|| format!("Failed to send search request to {}", self.endpoint))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            anyhow::bail!("Search failed ({}): {}", status, error_text);
        }

        response
            .json()
            .context("Failed to parse search response")
    }
}
