use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{ApiError, GroupSource};
use crate::domain::entities::Group;
use crate::domain::value_objects::Secret;

/// GitLab `GET /groups` client authenticated with a personal access token
#[derive(Clone)]
pub struct GitLabGroupsClient {
    http: Client,
    groups_url: Url,
    token: Secret,
}

impl GitLabGroupsClient {
    /// Create a client for the given groups endpoint, e.g.
    /// `https://gitlab.example.com/api/v4/groups`
    pub fn new(http: Client, groups_url: &str, token: Secret) -> Result<Self, ApiError> {
        let groups_url = Url::parse(groups_url).map_err(|e| ApiError::InvalidUrl {
            url: groups_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            groups_url,
            token,
        })
    }
}

#[async_trait]
impl GroupSource for GitLabGroupsClient {
    async fn fetch_group_page(&self, page: u32, per_page: u32) -> Result<Vec<Group>, ApiError> {
        let url = self.groups_url.as_str().to_string();

        let response = self
            .http
            .get(self.groups_url.clone())
            .header("Private-Token", self.token.expose())
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::info!("GitLab API Response: {} (page {})", status.as_u16(), page);
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}
