//! In-memory provider for offline play and scripted scenarios.

use super::{
    CategoryDetail, CategoryId, CategorySummary, ContentProvider, ProviderClue, ProviderError,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument, warn};

/// One category in a fixture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCategory {
    /// Category id.
    pub id: CategoryId,
    /// Category title.
    pub title: String,
    /// Clues served for the category.
    pub clues: Vec<ProviderClue>,
}

/// On-disk fixture format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Categories the provider knows about.
    pub categories: Vec<FixtureCategory>,
}

/// Provider serving categories from memory.
///
/// Listings come from scripted pages when any were given (served in order,
/// the last one repeating); otherwise every known category is listed with
/// its true clue count.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    categories: BTreeMap<CategoryId, CategoryDetail>,
    pages: Vec<Vec<CategorySummary>>,
    next_page: AtomicUsize,
    failing: HashSet<CategoryId>,
    failing_listings: AtomicUsize,
    list_calls: AtomicUsize,
    detail_calls: Mutex<Vec<CategoryId>>,
}

impl FixtureProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a provider from a JSON fixture file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ProviderError::Unavailable(format!("Failed to read fixture file: {}", e))
        })?;
        let file: FixtureFile = serde_json::from_str(&content)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse fixture: {}", e)))?;

        info!(categories = file.categories.len(), "Fixture loaded");
        Ok(Self::from(file))
    }

    /// Adds a category.
    pub fn with_category(
        mut self,
        id: CategoryId,
        title: impl Into<String>,
        clues: Vec<ProviderClue>,
    ) -> Self {
        self.categories.insert(id, CategoryDetail::new(title, clues));
        self
    }

    /// Adds a scripted listing page.
    pub fn with_page(mut self, page: Vec<CategorySummary>) -> Self {
        self.pages.push(page);
        self
    }

    /// Makes detail requests for `id` fail as unavailable.
    pub fn with_failing_category(mut self, id: CategoryId) -> Self {
        self.failing.insert(id);
        self
    }

    /// Makes the first `count` listing requests fail as unavailable.
    pub fn with_failing_listings(self, count: usize) -> Self {
        self.failing_listings.store(count, Ordering::SeqCst);
        self
    }

    /// Number of listing requests served so far, failures included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Ids requested through `get_category`, in request order.
    pub fn detail_calls(&self) -> Vec<CategoryId> {
        self.detail_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn default_listing(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|(id, detail)| CategorySummary::new(*id, detail.clues.len()))
            .collect()
    }
}

impl From<FixtureFile> for FixtureProvider {
    fn from(file: FixtureFile) -> Self {
        file.categories
            .into_iter()
            .fold(Self::new(), |provider, category| {
                provider.with_category(category.id, category.title, category.clues)
            })
    }
}

#[async_trait::async_trait]
impl ContentProvider for FixtureProvider {
    #[instrument(skip(self))]
    async fn list_categories(
        &self,
        page_size: usize,
    ) -> Result<Vec<CategorySummary>, ProviderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .failing_listings
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            warn!("Scripted listing failure");
            return Err(ProviderError::Unavailable("scripted listing failure".to_string()));
        }

        let mut page = if self.pages.is_empty() {
            self.default_listing()
        } else {
            let index = self.next_page.fetch_add(1, Ordering::SeqCst);
            self.pages[index.min(self.pages.len() - 1)].clone()
        };
        page.truncate(page_size);

        debug!(count = page.len(), "Serving listing page");
        Ok(page)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail, ProviderError> {
        if let Ok(mut calls) = self.detail_calls.lock() {
            calls.push(id);
        }

        if self.failing.contains(&id) {
            warn!("Scripted category failure");
            return Err(ProviderError::Unavailable(format!(
                "scripted failure for category {}",
                id
            )));
        }

        self.categories
            .get(&id)
            .cloned()
            .ok_or(ProviderError::NotFound(id))
    }
}
