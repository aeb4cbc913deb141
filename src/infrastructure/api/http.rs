use reqwest::{Client, Proxy};
use std::time::Duration;

use super::ApiError;

/// Shared HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpClientSettings {
    /// Proxy for `http://` URLs
    pub http_proxy: Option<String>,

    /// Proxy for `https://` URLs
    pub https_proxy: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            http_proxy: None,
            https_proxy: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpClientSettings {
    pub fn with_http_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http_proxy = Some(proxy.into());
        self
    }

    pub fn with_https_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.https_proxy = Some(proxy.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Build the client both API wrappers share
pub fn build_http_client(settings: &HttpClientSettings) -> Result<Client, ApiError> {
    let mut builder = Client::builder()
        .timeout(settings.timeout)
        .user_agent(concat!("scmsync/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = &settings.http_proxy {
        let proxy_config = Proxy::http(proxy).map_err(|source| ApiError::Proxy {
            proxy: proxy.clone(),
            source,
        })?;
        builder = builder.proxy(proxy_config);
    }

    if let Some(proxy) = &settings.https_proxy {
        let proxy_config = Proxy::https(proxy).map_err(|source| ApiError::Proxy {
            proxy: proxy.clone(),
            source,
        })?;
        builder = builder.proxy(proxy_config);
    }

    builder.build().map_err(ApiError::Client)
}
