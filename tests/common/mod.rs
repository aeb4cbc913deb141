//! Shared fakes for the integration tests
//!
//! `FakeGitLab` and `FakeScanner` stand in for the two remote services. The
//! scanner fake keeps its config list behind a mutex so that a create or
//! delete is visible to the next run, which is what idempotence tests need.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use scmsync::application::services::outcome::MutationOutcome;
use scmsync::domain::entities::{ConfigId, Group, NewScmConfig, ScmConfig};
use scmsync::infrastructure::api::{ApiError, ConfigRegistry, GroupSource};
use scmsync::infrastructure::filesystem::AuditLog;

pub const GITLAB_BASE_URL: &str = "https://gitlab.example.com";

/// Paged GitLab listing; a `None` page answers with HTTP 500
#[derive(Clone, Default)]
pub struct FakeGitLab {
    pages: Vec<Option<Vec<String>>>,
}

impl FakeGitLab {
    /// All groups on a single page
    pub fn with_groups(groups: &[&str]) -> Self {
        Self::with_pages(vec![Some(groups.to_vec())])
    }

    pub fn with_pages(pages: Vec<Option<Vec<&str>>>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|page| page.map(|names| names.into_iter().map(String::from).collect()))
                .collect(),
        }
    }
}

#[async_trait]
impl GroupSource for FakeGitLab {
    async fn fetch_group_page(&self, page: u32, _per_page: u32) -> Result<Vec<Group>, ApiError> {
        match self.pages.get(page as usize - 1) {
            Some(Some(names)) => Ok(names.iter().map(Group::new).collect()),
            Some(None) => Err(ApiError::Status {
                url: format!("{GITLAB_BASE_URL}/api/v4/groups"),
                status: 500,
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Calls seen by [`FakeScanner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerCall {
    Create(String),
    Delete(String),
}

#[derive(Default)]
struct ScannerState {
    configs: Vec<ScmConfig>,
    calls: Vec<ScannerCall>,
    next_id: u64,
}

/// In-memory scanner config registry
#[derive(Clone, Default)]
pub struct FakeScanner {
    state: Arc<Mutex<ScannerState>>,
    fail_listing: bool,
    conflicts: Vec<String>,
}

impl FakeScanner {
    pub fn with_configs(configs: Vec<ScmConfig>) -> Self {
        let next_id = configs
            .iter()
            .filter_map(|c| match c.id {
                ConfigId::Number(n) => Some(n),
                ConfigId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            state: Arc::new(Mutex::new(ScannerState {
                configs,
                calls: Vec::new(),
                next_id,
            })),
            ..Self::default()
        }
    }

    /// Listing fails with HTTP 503
    pub fn failing_listing() -> Self {
        Self {
            fail_listing: true,
            ..Self::default()
        }
    }

    /// Creating any of `namespaces` answers 409
    pub fn with_conflicts(mut self, namespaces: &[&str]) -> Self {
        self.conflicts = namespaces.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<ScannerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self
            .state
            .lock()
            .unwrap()
            .configs
            .iter()
            .map(|c| c.namespace.clone())
            .collect();
        namespaces.sort();
        namespaces
    }
}

#[async_trait]
impl ConfigRegistry for FakeScanner {
    async fn fetch_configs(&self) -> Result<Vec<ScmConfig>, ApiError> {
        if self.fail_listing {
            return Err(ApiError::Status {
                url: "https://scanner.example.com/api/scm/deployments/1/configs".into(),
                status: 503,
            });
        }
        Ok(self.state.lock().unwrap().configs.clone())
    }

    async fn create_config(&self, config: &NewScmConfig) -> Result<MutationOutcome, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ScannerCall::Create(config.namespace.clone()));

        if self.conflicts.contains(&config.namespace) {
            return Ok(MutationOutcome::classify(409, r#"{"error":"already exists"}"#));
        }

        let id = state.next_id;
        state.next_id += 1;
        state
            .configs
            .push(ScmConfig::new(id, config.namespace.clone(), config.base_url.clone()));
        Ok(MutationOutcome::classify(200, "{}"))
    }

    async fn delete_config(&self, id: &ConfigId) -> Result<MutationOutcome, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ScannerCall::Delete(id.to_string()));

        let before = state.configs.len();
        state.configs.retain(|c| &c.id != id);
        if state.configs.len() == before {
            Ok(MutationOutcome::classify(404, ""))
        } else {
            Ok(MutationOutcome::classify(200, "{}"))
        }
    }
}

/// Audit log inside a fresh temporary directory
pub fn temp_audit_log() -> (TempDir, AuditLog) {
    let dir = TempDir::new().unwrap();
    let log = AuditLog::new(dir.path().join("semgrep_api_calls.log"));
    (dir, log)
}

pub fn read_log(log: &AuditLog) -> String {
    std::fs::read_to_string(log.path()).unwrap_or_default()
}
