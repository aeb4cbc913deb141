use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::application::services::rate_limit::FixedDelay;
use crate::application::use_cases::reconcile::ReconcileConfig;
use crate::domain::value_objects::{ScmType, Secret};
use crate::infrastructure::api::HttpClientSettings;
use crate::infrastructure::credentials::CredentialRef;

/// Config store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Config file not found at path: {0}")]
    NotFound(PathBuf),

    #[error("Config file read failed for {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file write failed for {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("YAML parsing failed: {source}")]
    YamlParsingFailed {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config validation failed: {reason}")]
    ValidationFailed {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl ConfigStoreError {
    /// File the error refers to, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigStoreError::NotFound(path)
            | ConfigStoreError::AlreadyExists(path)
            | ConfigStoreError::ReadFailed { path, .. }
            | ConfigStoreError::WriteFailed { path, .. } => Some(path),
            ConfigStoreError::YamlParsingFailed { path, .. }
            | ConfigStoreError::ValidationFailed { path, .. } => path.as_deref(),
        }
    }
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10_000
}

fn default_gitlab_token() -> CredentialRef {
    CredentialRef::new("gitlab", "GITLAB_ACCESS_TOKEN")
}

fn default_scanner_token() -> CredentialRef {
    CredentialRef::new("semgrep_api", "SEMGREP_ACCESS_TOKEN")
}

fn default_marker() -> String {
    "gitlab".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("semgrep_api_calls.log")
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

/// `gitlab:` section
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GitLabSection {
    /// Groups endpoint, e.g. `https://gitlab.example.com/api/v4/groups`
    #[validate(url)]
    pub groups_url: String,

    /// Base URL recorded on created configs
    #[validate(url)]
    pub base_url: String,

    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,

    #[serde(default = "default_max_pages")]
    #[validate(range(min = 1))]
    pub max_pages: u32,

    #[serde(default = "default_gitlab_token")]
    #[validate(nested)]
    pub token: CredentialRef,
}

/// `scanner:` section
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScannerSection {
    /// SCM config endpoint of the scanner deployment
    #[validate(url)]
    pub configs_url: String,

    #[serde(default)]
    pub scm_type: ScmType,

    #[serde(default = "default_scanner_token")]
    #[validate(nested)]
    pub token: CredentialRef,
}

/// `proxy:` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProxySection {
    #[validate(url)]
    pub http: Option<String>,

    #[validate(url)]
    pub https: Option<String>,
}

/// Parsed `scmsync.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub gitlab: GitLabSection,

    #[validate(nested)]
    pub scanner: ScannerSection,

    #[serde(default)]
    #[validate(nested)]
    pub proxy: ProxySection,

    #[serde(default = "default_marker")]
    #[validate(length(min = 1))]
    pub gitlab_host_marker: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Parse and validate YAML; `path` is only used for error context
    pub fn from_yaml_str(content: &str, path: Option<&Path>) -> Result<Self, ConfigStoreError> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigStoreError::YamlParsingFailed {
                path: path.map(Path::to_path_buf),
                source,
            })?;

        config
            .validate()
            .map_err(|e| ConfigStoreError::ValidationFailed {
                path: path.map(Path::to_path_buf),
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn http_settings(&self) -> HttpClientSettings {
        let mut settings =
            HttpClientSettings::default().with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(proxy) = &self.proxy.http {
            settings = settings.with_http_proxy(proxy.clone());
        }
        if let Some(proxy) = &self.proxy.https {
            settings = settings.with_https_proxy(proxy.clone());
        }
        settings
    }

    pub fn rate_limit(&self) -> FixedDelay {
        FixedDelay::new(Duration::from_millis(self.request_delay_ms))
    }

    /// Reconcile settings; the GitLab token is passed through to created configs
    pub fn reconcile_config(&self, gitlab_token: Secret, dry_run: bool) -> ReconcileConfig {
        ReconcileConfig::new(self.gitlab.base_url.clone(), gitlab_token)
            .with_per_page(self.gitlab.per_page)
            .with_max_pages(self.gitlab.max_pages)
            .with_scm_type(self.scanner.scm_type)
            .with_gitlab_marker(self.gitlab_host_marker.clone())
            .with_dry_run(dry_run)
    }
}

/// Loads and writes `scmsync.yaml`
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and validate the config file
    pub async fn load(&self, path: &Path) -> Result<AppConfig, ConfigStoreError> {
        if !path.exists() {
            return Err(ConfigStoreError::NotFound(path.to_path_buf()));
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigStoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config = AppConfig::from_yaml_str(&content, Some(path))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write `content` to `path`, refusing to overwrite unless `force` is set
    pub async fn write_template(
        &self,
        path: &Path,
        content: &str,
        force: bool,
    ) -> Result<(), ConfigStoreError> {
        if path.exists() && !force {
            return Err(ConfigStoreError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigStoreError::WriteFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|source| ConfigStoreError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
gitlab:
  groups_url: https://gitlab.example.com/api/v4/groups
  base_url: https://gitlab.example.com
scanner:
  configs_url: https://semgrep.dev/api/scm/deployments/1/configs
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_yaml_str(MINIMAL, None).unwrap();
        assert_eq!(config.gitlab.per_page, 100);
        assert_eq!(config.gitlab.max_pages, 10_000);
        assert_eq!(config.gitlab.token, CredentialRef::new("gitlab", "GITLAB_ACCESS_TOKEN"));
        assert_eq!(
            config.scanner.token,
            CredentialRef::new("semgrep_api", "SEMGREP_ACCESS_TOKEN")
        );
        assert_eq!(config.scanner.scm_type, ScmType::GitLabSelfManaged);
        assert_eq!(config.gitlab_host_marker, "gitlab");
        assert_eq!(config.log_file, PathBuf::from("semgrep_api_calls.log"));
        assert_eq!(config.rate_limit().delay(), Duration::from_secs(1));
        assert!(config.proxy.http.is_none());
    }

    #[test]
    fn test_reconcile_config_from_file() {
        let yaml = format!("{MINIMAL}gitlab_host_marker: git.corp\n");
        let config = AppConfig::from_yaml_str(&yaml, None).unwrap();
        let reconcile = config.reconcile_config(Secret::new("glpat"), true);

        assert_eq!(reconcile.gitlab_base_url, "https://gitlab.example.com");
        assert_eq!(reconcile.gitlab_marker, "git.corp");
        assert_eq!(reconcile.per_page, 100);
        assert!(reconcile.dry_run);
    }

    #[test]
    fn test_proxy_settings() {
        let yaml = format!(
            "{MINIMAL}proxy:\n  http: http://proxy.example.com:8080\n  https: http://proxy.example.com:8443\n"
        );
        let settings = AppConfig::from_yaml_str(&yaml, None).unwrap().http_settings();
        assert_eq!(settings.http_proxy.as_deref(), Some("http://proxy.example.com:8080"));
        assert_eq!(settings.https_proxy.as_deref(), Some("http://proxy.example.com:8443"));
    }

    #[test]
    fn test_rejects_out_of_range_page_size() {
        let yaml = MINIMAL.replace(
            "  base_url: https://gitlab.example.com\n",
            "  base_url: https://gitlab.example.com\n  per_page: 500\n",
        );
        let err = AppConfig::from_yaml_str(&yaml, None).unwrap_err();
        assert!(matches!(err, ConfigStoreError::ValidationFailed { .. }));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let yaml = MINIMAL.replace("https://gitlab.example.com/api/v4/groups", "not-a-url");
        let err = AppConfig::from_yaml_str(&yaml, None).unwrap_err();
        assert!(matches!(err, ConfigStoreError::ValidationFailed { .. }));
    }

    #[test]
    fn test_rejects_missing_section() {
        let err = AppConfig::from_yaml_str("gitlab: {}\n", None).unwrap_err();
        assert!(matches!(err, ConfigStoreError::YamlParsingFailed { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scmsync.yaml");
        let err = ConfigStore::new().load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigStoreError::NotFound(_)));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_write_template_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scmsync.yaml");
        let store = ConfigStore::new();

        store.write_template(&path, MINIMAL, false).await.unwrap();
        let err = store.write_template(&path, MINIMAL, false).await.unwrap_err();
        assert!(matches!(err, ConfigStoreError::AlreadyExists(_)));
        store.write_template(&path, MINIMAL, true).await.unwrap();

        let loaded = store.load(&path).await.unwrap();
        assert_eq!(loaded.gitlab.base_url, "https://gitlab.example.com");
    }
}
