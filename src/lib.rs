//! # scmsync - GitLab to scanner SCM config reconciliation
//!
//! `scmsync` keeps the SCM configurations registered with a security
//! scanning service in step with the groups of a GitLab instance. Each run:
//!
//! 1. pages through every GitLab group (`GET /groups`),
//! 2. lists the scanner's registered SCM configs,
//! 3. diffs the two namespace sets,
//! 4. creates configs for new groups and deletes GitLab-origin configs whose
//!    group is gone,
//! 5. appends every outcome to a local log file.
//!
//! ## Quick Start
//!
//! ```bash
//! scmsync init          # writes scmsync.yaml
//! scmsync --dry-run     # preview
//! scmsync               # reconcile
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: groups, SCM configs, and their value objects
//! - [`application`]: the diff engine, outcome classification, rate limiting
//!   and the reconcile use case
//! - [`infrastructure`]: reqwest API clients, keyring credentials, config
//!   file and audit log
//! - [`presentation`]: CLI interface
//! - [`common`]: shared error handling
//!
//! ## Using the Library
//!
//! The use case is generic over its two remote services, so any
//! [`infrastructure::api::GroupSource`] / [`infrastructure::api::ConfigRegistry`]
//! pair can drive it:
//!
//! ```rust,no_run
//! use scmsync::application::services::rate_limit::FixedDelay;
//! use scmsync::application::use_cases::reconcile::{ReconcileConfig, ReconcileUseCase};
//! use scmsync::domain::value_objects::Secret;
//! use scmsync::infrastructure::api::{
//!     build_http_client, GitLabGroupsClient, HttpClientSettings, ScannerConfigClient,
//! };
//! use scmsync::infrastructure::filesystem::AuditLog;
//!
//! # async fn example() -> scmsync::Result<()> {
//! let http = build_http_client(&HttpClientSettings::default())?;
//! let gitlab_token = Secret::new("glpat-...");
//! let groups = GitLabGroupsClient::new(
//!     http.clone(),
//!     "https://gitlab.example.com/api/v4/groups",
//!     gitlab_token.clone(),
//! )?;
//! let registry = ScannerConfigClient::new(
//!     http,
//!     "https://semgrep.dev/api/scm/deployments/1/configs",
//!     Secret::new("scanner-token"),
//! )?;
//!
//! let use_case = ReconcileUseCase::new(
//!     ReconcileConfig::new("https://gitlab.example.com", gitlab_token),
//!     groups,
//!     registry,
//!     FixedDelay::default(),
//!     AuditLog::new("semgrep_api_calls.log"),
//! );
//! let report = use_case.execute().await?;
//! println!("created {} / deleted {}", report.created, report.deleted);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::ScmSyncError;
pub use crate::common::result::ScmSyncResult as Result;
