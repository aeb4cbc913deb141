use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::{ScmType, Secret};

/// Identifier assigned by the scanning service.
///
/// The service treats ids as opaque; both numeric and string forms are
/// accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigId::Number(id) => write!(f, "{id}"),
            ConfigId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ConfigId {
    fn from(id: u64) -> Self {
        ConfigId::Number(id)
    }
}

/// An SCM config registered with the scanning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScmConfig {
    pub id: ConfigId,

    /// Namespace the config points at, matched against `Group::full_path`
    pub namespace: String,

    /// Base URL of the SCM instance; used to tell GitLab configs apart
    #[serde(default)]
    pub base_url: String,
}

impl ScmConfig {
    pub fn new(
        id: impl Into<ConfigId>,
        namespace: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            base_url: base_url.into(),
        }
    }

    /// Whether this config belongs to the GitLab instance identified by `marker`
    pub fn is_gitlab_origin(&self, marker: &str) -> bool {
        self.base_url.contains(marker)
    }
}

/// Response envelope of the config listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScmConfigList {
    pub configs: Vec<ScmConfig>,
}

/// Create payload for a new SCM config
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScmConfig {
    #[serde(rename = "type")]
    pub scm_type: ScmType,
    pub base_url: String,
    pub namespace: String,
    #[serde(serialize_with = "Secret::serialize_exposed")]
    pub access_token: Secret,
}

impl NewScmConfig {
    pub fn new(
        scm_type: ScmType,
        base_url: impl Into<String>,
        namespace: impl Into<String>,
        access_token: Secret,
    ) -> Self {
        Self {
            scm_type,
            base_url: base_url.into(),
            namespace: namespace.into(),
            access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_list_deserializes() {
        let json = r#"{"configs": [
            {"id": 5, "namespace": "team-b", "baseUrl": "https://gitlab.x.com"},
            {"id": "abc", "namespace": "org", "baseUrl": "https://github.com"}
        ]}"#;
        let list: ScmConfigList = serde_json::from_str(json).unwrap();
        assert_eq!(
            list.configs,
            vec![
                ScmConfig::new(5u64, "team-b", "https://gitlab.x.com"),
                ScmConfig::new(ConfigId::Text("abc".into()), "org", "https://github.com"),
            ]
        );
        assert_eq!(list.configs[0].id.to_string(), "5");
    }

    #[test]
    fn test_gitlab_origin_marker() {
        let config = ScmConfig::new(1u64, "team", "https://gitlab.example.com");
        assert!(config.is_gitlab_origin("gitlab"));
        assert!(!ScmConfig::new(2u64, "team", "https://github.com").is_gitlab_origin("gitlab"));
    }

    #[test]
    fn test_new_config_payload_shape() {
        let payload = NewScmConfig::new(
            ScmType::GitLabSelfManaged,
            "https://gitlab.example.com",
            "team-a",
            Secret::new("glpat-token"),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "SCM_TYPE_GITLAB_SELFMANAGED",
                "baseUrl": "https://gitlab.example.com",
                "namespace": "team-a",
                "accessToken": "glpat-token"
            })
        );
    }
}
