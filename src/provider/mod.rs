//! Content provider abstraction.
//!
//! A provider lists category summaries and serves the full clue set of a
//! single category. Every call is fallible; callers decide whether a
//! failure is fatal.

mod fixture;
mod jservice;

pub use fixture::{FixtureCategory, FixtureFile, FixtureProvider};
pub use jservice::JServiceProvider;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Provider-side category identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

/// Listing entry: a category id and how many clues the provider claims it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct CategorySummary {
    /// Category id.
    pub id: CategoryId,
    /// Reported clue count. May be stale.
    pub clue_count: usize,
}

/// A question/answer pair as served by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ProviderClue {
    /// Question text.
    #[new(into)]
    pub question: String,
    /// Answer text.
    #[new(into)]
    pub answer: String,
}

/// Full category payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct CategoryDetail {
    /// Category title.
    #[new(into)]
    pub title: String,
    /// Every clue the provider has for the category.
    pub clues: Vec<ProviderClue>,
}

/// Error returned by a provider request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProviderError {
    /// Transport or HTTP failure.
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),

    /// The provider has no category with this id.
    #[display("Category {} not found", _0)]
    NotFound(CategoryId),

    /// The provider answered with a payload that could not be decoded.
    #[display("Malformed provider response: {}", _0)]
    Malformed(String),
}

impl std::error::Error for ProviderError {}

/// Source of categories and clues.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Lists up to `page_size` category summaries.
    async fn list_categories(
        &self,
        page_size: usize,
    ) -> Result<Vec<CategorySummary>, ProviderError>;

    /// Fetches the title and full clue set of one category.
    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail, ProviderError>;
}
