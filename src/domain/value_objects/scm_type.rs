use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// SCM type errors
#[derive(Debug, Error, PartialEq)]
pub enum ScmTypeError {
    #[error("Unsupported SCM type: {0}")]
    UnsupportedScmType(String),
}

/// SCM provider tag understood by the scanning service's config API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScmType {
    /// Self-managed GitLab instance
    #[serde(rename = "SCM_TYPE_GITLAB_SELFMANAGED")]
    GitLabSelfManaged,
    /// gitlab.com
    #[serde(rename = "SCM_TYPE_GITLAB")]
    GitLab,
}

impl Default for ScmType {
    fn default() -> Self {
        Self::GitLabSelfManaged
    }
}

impl ScmType {
    /// Wire representation of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ScmType::GitLabSelfManaged => "SCM_TYPE_GITLAB_SELFMANAGED",
            ScmType::GitLab => "SCM_TYPE_GITLAB",
        }
    }
}

impl fmt::Display for ScmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScmType {
    type Err = ScmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SCM_TYPE_GITLAB_SELFMANAGED" | "GITLAB_SELFMANAGED" => Ok(ScmType::GitLabSelfManaged),
            "SCM_TYPE_GITLAB" | "GITLAB" => Ok(ScmType::GitLab),
            _ => Err(ScmTypeError::UnsupportedScmType(s.to_string())),
        }
    }
}
