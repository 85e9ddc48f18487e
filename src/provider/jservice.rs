//! HTTP provider speaking the jService category API.

use super::{
    CategoryDetail, CategoryId, CategorySummary, ContentProvider, ProviderClue, ProviderError,
};
use rand::Rng;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Listing entry on the wire.
#[derive(Debug, Deserialize)]
struct WireSummary {
    id: u64,
    #[serde(default)]
    clues_count: usize,
}

/// Clue on the wire. jService serves nulls for some retired clues.
#[derive(Debug, Deserialize)]
struct WireClue {
    question: Option<String>,
    answer: Option<String>,
}

/// Category payload on the wire.
#[derive(Debug, Deserialize)]
struct WireCategory {
    title: String,
    #[serde(default)]
    clues: Vec<WireClue>,
}

impl WireClue {
    fn into_clue(self) -> Option<ProviderClue> {
        let question = self.question?.trim().to_string();
        let answer = self.answer?.trim().to_string();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(ProviderClue { question, answer })
    }
}

/// Provider backed by a jService-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct JServiceProvider {
    base_url: String,
    client: reqwest::Client,
    max_offset: u32,
}

impl JServiceProvider {
    /// Creates a provider for the API at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref(), timeout = ?timeout))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ProviderError> {
        info!("Creating jService provider");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                ProviderError::Unavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
            max_offset: 0,
        })
    }

    /// Requests listings at a random offset in `0..=max_offset`.
    pub fn with_max_offset(mut self, max_offset: u32) -> Self {
        self.max_offset = max_offset;
        self
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ProviderError> {
        Url::parse_with_params(&format!("{}{}", self.base_url, path), params)
            .map_err(|e| ProviderError::Unavailable(format!("Invalid provider URL: {}", e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        id: Option<CategoryId>,
    ) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            debug!(error = ?e, "Provider request failed");
            ProviderError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ProviderError::NotFound(id));
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "Failed to decode provider response");
            ProviderError::Malformed(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl ContentProvider for JServiceProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_categories(
        &self,
        page_size: usize,
    ) -> Result<Vec<CategorySummary>, ProviderError> {
        let mut params = vec![("count", page_size.to_string())];
        if self.max_offset > 0 {
            let offset = rand::thread_rng().gen_range(0..=self.max_offset);
            params.push(("offset", offset.to_string()));
        }

        let url = self.endpoint("/api/categories", &params)?;
        debug!(%url, "Listing categories");

        let summaries: Vec<WireSummary> = self.get_json(url, None).await?;
        debug!(count = summaries.len(), "Received category listing");

        Ok(summaries
            .into_iter()
            .map(|wire| CategorySummary::new(CategoryId(wire.id), wire.clues_count))
            .collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail, ProviderError> {
        let url = self.endpoint("/api/category", &[("id", id.0.to_string())])?;
        let wire: WireCategory = self.get_json(url, Some(id)).await?;

        let served = wire.clues.len();
        let clues: Vec<ProviderClue> = wire
            .clues
            .into_iter()
            .filter_map(WireClue::into_clue)
            .collect();
        debug!(served, usable = clues.len(), "Received category");

        Ok(CategoryDetail::new(wire.title, clues))
    }
}
