use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use url::Url;

use super::{ApiError, ConfigRegistry};
use crate::application::services::outcome::MutationOutcome;
use crate::domain::entities::{ConfigId, NewScmConfig, ScmConfig, ScmConfigList};
use crate::domain::value_objects::Secret;

/// Client for the scanning service's SCM config endpoint
/// (`.../api/scm/deployments/<deployment>/configs`)
#[derive(Clone)]
pub struct ScannerConfigClient {
    http: Client,
    configs_url: Url,
    token: Secret,
}

impl ScannerConfigClient {
    pub fn new(http: Client, configs_url: &str, token: Secret) -> Result<Self, ApiError> {
        let configs_url = Url::parse(configs_url).map_err(|e| ApiError::InvalidUrl {
            url: configs_url.to_string(),
            reason: e.to_string(),
        })?;

        if configs_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: configs_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            http,
            configs_url,
            token,
        })
    }

    /// `<configs_url>/<id>`
    pub fn config_url(&self, id: &ConfigId) -> Result<Url, ApiError> {
        let mut url = self.configs_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.configs_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token.expose())
    }

    async fn send_mutation(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<MutationOutcome, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(MutationOutcome::classify(status, body))
    }
}

#[async_trait]
impl ConfigRegistry for ScannerConfigClient {
    async fn fetch_configs(&self) -> Result<Vec<ScmConfig>, ApiError> {
        let url = self.configs_url.to_string();

        let response = self
            .authorized(self.http.get(self.configs_url.clone()))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::info!("Scanner GET configs response: {}", status.as_u16());
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let list: ScmConfigList = serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })?;

        tracing::info!("Fetched {} configs from the scanner", list.configs.len());
        Ok(list.configs)
    }

    async fn create_config(&self, config: &NewScmConfig) -> Result<MutationOutcome, ApiError> {
        let request = self.http.post(self.configs_url.clone()).json(config);
        self.send_mutation(request, &self.configs_url).await
    }

    async fn delete_config(&self, id: &ConfigId) -> Result<MutationOutcome, ApiError> {
        let url = self.config_url(id)?;
        let request = self.http.delete(url.clone());
        self.send_mutation(request, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> ScannerConfigClient {
        ScannerConfigClient::new(Client::new(), url, Secret::new("token")).unwrap()
    }

    #[test]
    fn test_config_url_appends_id() {
        let scanner = client("https://semgrep.dev/api/scm/deployments/42/configs");
        assert_eq!(
            scanner.config_url(&ConfigId::Number(5)).unwrap().as_str(),
            "https://semgrep.dev/api/scm/deployments/42/configs/5"
        );
    }

    #[test]
    fn test_config_url_handles_trailing_slash() {
        let scanner = client("https://semgrep.dev/api/scm/deployments/42/configs/");
        assert_eq!(
            scanner.config_url(&ConfigId::Text("abc".into())).unwrap().as_str(),
            "https://semgrep.dev/api/scm/deployments/42/configs/abc"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = ScannerConfigClient::new(Client::new(), "not a url", Secret::new("t"));
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }
}
