/// Remote API access
///
/// Two capability traits sit at the seam between the reconcile use case
/// and the network:
/// - [`GroupSource`]: paginated GitLab group listing
/// - [`ConfigRegistry`]: the scanner's SCM config list/create/delete API
///
/// Tests substitute fakes for both; [`gitlab::GitLabGroupsClient`] and
/// [`scanner::ScannerConfigClient`] are the reqwest implementations.
pub mod gitlab;
pub mod http;
pub mod scanner;

use async_trait::async_trait;
use thiserror::Error;

use crate::application::services::outcome::MutationOutcome;
use crate::domain::entities::{ConfigId, Group, NewScmConfig, ScmConfig};

pub use gitlab::GitLabGroupsClient;
pub use http::{build_http_client, HttpClientSettings};
pub use scanner::ScannerConfigClient;

/// Remote API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid proxy URL {proxy}: {source}")]
    Proxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// How a paginated group listing ended
#[derive(Debug)]
pub enum ListingEnd {
    /// An empty page was returned
    Exhausted,
    /// A page failed; earlier pages were kept
    Failed { page: u32, error: ApiError },
    /// The page guard tripped before an empty page was seen
    PageLimit { max_pages: u32 },
}

/// Every group collected by [`GroupSource::fetch_groups`]
#[derive(Debug)]
pub struct GroupListing {
    pub groups: Vec<Group>,
    pub pages: u32,
    pub end: ListingEnd,
}

impl GroupListing {
    /// Whether the listing reached the final (empty) page
    pub fn is_complete(&self) -> bool {
        matches!(self.end, ListingEnd::Exhausted)
    }
}

/// Source of truth for group namespaces
#[async_trait]
pub trait GroupSource: Send + Sync {
    /// Fetch one page (1-based) of groups
    async fn fetch_group_page(&self, page: u32, per_page: u32) -> Result<Vec<Group>, ApiError>;

    /// Walk pages until an empty one comes back.
    ///
    /// A failing page stops the walk; groups from earlier pages are still
    /// returned and the failure is reported through [`GroupListing::end`].
    async fn fetch_groups(&self, per_page: u32, max_pages: u32) -> GroupListing {
        let mut groups = Vec::new();
        let mut page = 1;

        loop {
            if page > max_pages {
                tracing::warn!("Stopping group pagination after {} pages", max_pages);
                return GroupListing {
                    groups,
                    pages: max_pages,
                    end: ListingEnd::PageLimit { max_pages },
                };
            }

            match self.fetch_group_page(page, per_page).await {
                Ok(batch) if batch.is_empty() => {
                    return GroupListing {
                        groups,
                        pages: page - 1,
                        end: ListingEnd::Exhausted,
                    };
                }
                Ok(batch) => {
                    tracing::debug!("Fetched {} groups from page {}", batch.len(), page);
                    groups.extend(batch);
                    page += 1;
                }
                Err(error) => {
                    tracing::error!("Group page {} failed: {}", page, error);
                    return GroupListing {
                        groups,
                        pages: page - 1,
                        end: ListingEnd::Failed { page, error },
                    };
                }
            }
        }
    }
}

/// The scanner's SCM config API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigRegistry: Send + Sync {
    /// List every registered config
    async fn fetch_configs(&self) -> Result<Vec<ScmConfig>, ApiError>;

    /// Register a config. Non-2xx answers are classified, not errors.
    async fn create_config(&self, config: &NewScmConfig) -> Result<MutationOutcome, ApiError>;

    /// Remove a config by id. Non-2xx answers are classified, not errors.
    async fn delete_config(&self, id: &ConfigId) -> Result<MutationOutcome, ApiError>;
}
