use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use vocable_core::entry::VocabEntry;
use vocable_core::scheduler::FilterMode;

use crate::{NewVocab, VocabularyStore};

/// Client for the remote vocabulary API. Stateless beyond the base URL
/// and an optional bearer credential; no automatic retry.
#[derive(Clone)]
pub struct HttpVocabStore {
    base_url: String,
    client: reqwest::Client,
    bearer: Option<String>,
}

impl HttpVocabStore {
    pub fn new(base_url: String) -> Self {
        Self::with_bearer(base_url, None)
    }

    /// When a session exists, every call carries
    /// `Authorization: Bearer <idToken>`.
    pub fn with_bearer(base_url: String, bearer: Option<String>) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            bearer,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(rename = "vocID")]
    voc_id: String,
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .context("failed to reach vocabulary API")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("vocabulary API error: HTTP {status} {}", body.trim());
    }

    Ok(response)
}

#[async_trait]
impl VocabularyStore for HttpVocabStore {
    async fn create(&self, new: NewVocab) -> Result<VocabEntry> {
        new.validate()?;

        let response = send(self.request(Method::POST, "/vocabulary").json(&new)).await?;
        let created: CreateResponse = response
            .json()
            .await
            .context("failed to parse create response")?;
        tracing::debug!("created vocabulary {}", created.voc_id);

        Ok(VocabEntry::new(
            created.voc_id,
            new.owner_id,
            new.source_text,
            new.target_text,
            new.origin,
            new.tags,
            Utc::now(),
        ))
    }

    async fn get(&self, owner_id: &str, id: &str) -> Result<VocabEntry> {
        let response = send(
            self.request(Method::GET, "/vocabulary")
                .query(&[("userid", owner_id), ("vocID", id)]),
        )
        .await?;
        response
            .json()
            .await
            .context("failed to parse vocabulary entry")
    }

    async fn list(
        &self,
        owner_id: &str,
        mode: FilterMode,
        count: Option<u32>,
    ) -> Result<Vec<VocabEntry>> {
        let mode = mode.to_string();
        let mut request = self
            .request(Method::GET, "/vocabularies")
            .query(&[("userid", owner_id), ("mode", mode.as_str())]);
        // "no cap" omits the parameter entirely
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }

        let response = send(request).await?;
        response
            .json()
            .await
            .context("failed to parse vocabulary list")
    }

    async fn update(&self, entry: &VocabEntry) -> Result<()> {
        send(self.request(Method::PUT, "/vocabulary").json(entry)).await?;
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        send(
            self.request(Method::DELETE, "/vocabulary")
                .query(&[("userid", owner_id), ("vocID", id)]),
        )
        .await?;
        Ok(())
    }
}
