use thiserror::Error;

use crate::application::services::diff_engine::ReconcilePlan;
use crate::application::services::outcome::{MutationAction, MutationOutcome};
use crate::application::services::rate_limit::RateLimitPolicy;
use crate::domain::entities::{NewScmConfig, ScmConfig};
use crate::domain::value_objects::{ScmType, Secret};
use crate::infrastructure::api::{ApiError, ConfigRegistry, GroupSource, ListingEnd};
use crate::infrastructure::filesystem::audit_log::AuditLog;

/// Reconciliation errors
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The existing config set is unknown, so no mutation is safe
    #[error("Failed to fetch existing SCM configs: {0}")]
    ConfigFetchFailed(#[source] ApiError),
}

/// Settings for one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Groups requested per GitLab page
    pub per_page: u32,

    /// Hard stop for pagination
    pub max_pages: u32,

    /// GitLab base URL written into every created config
    pub gitlab_base_url: String,

    /// SCM type tag written into every created config
    pub scm_type: ScmType,

    /// Token the scanner uses to read GitLab
    pub gitlab_access_token: Secret,

    /// Substring of a config base URL marking it as GitLab-origin
    pub gitlab_marker: String,

    /// Compute and log the plan without mutating anything
    pub dry_run: bool,
}

impl ReconcileConfig {
    pub fn new(gitlab_base_url: impl Into<String>, gitlab_access_token: Secret) -> Self {
        Self {
            per_page: 100,
            max_pages: 10_000,
            gitlab_base_url: gitlab_base_url.into(),
            scm_type: ScmType::default(),
            gitlab_access_token,
            gitlab_marker: "gitlab".to_string(),
            dry_run: false,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_scm_type(mut self, scm_type: ScmType) -> Self {
        self.scm_type = scm_type;
        self
    }

    pub fn with_gitlab_marker(mut self, marker: impl Into<String>) -> Self {
        self.gitlab_marker = marker.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub groups_fetched: usize,
    pub group_listing_complete: bool,
    pub configs_fetched: usize,
    pub planned_additions: usize,
    pub planned_removals: usize,
    pub created: usize,
    pub already_existed: usize,
    pub deleted: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Removals were dropped because the group listing ended early
    pub removals_skipped: bool,
    pub dry_run: bool,
}

impl ReconcileReport {
    /// Number of create and delete calls issued
    pub fn calls_issued(&self) -> usize {
        self.created + self.already_existed + self.deleted + self.not_found + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.group_listing_complete
    }
}

/// GitLab group -> scanner SCM config reconciliation
pub struct ReconcileUseCase<G, R, L> {
    config: ReconcileConfig,
    groups: G,
    registry: R,
    limiter: L,
    audit: AuditLog,
}

impl<G, R, L> ReconcileUseCase<G, R, L>
where
    G: GroupSource,
    R: ConfigRegistry,
    L: RateLimitPolicy,
{
    pub fn new(config: ReconcileConfig, groups: G, registry: R, limiter: L, audit: AuditLog) -> Self {
        Self {
            config,
            groups,
            registry,
            limiter,
            audit,
        }
    }

    /// Run the pipeline once: list, diff, apply.
    ///
    /// Only a failed config listing aborts the run; every other failure is
    /// logged and absorbed.
    pub async fn execute(&self) -> Result<ReconcileReport, ReconcileError> {
        let mut report = ReconcileReport {
            dry_run: self.config.dry_run,
            ..ReconcileReport::default()
        };

        self.log("Script started").await;

        // 1. GitLab groups
        self.log("Fetching current GitLab groups").await;
        let listing = self
            .groups
            .fetch_groups(self.config.per_page, self.config.max_pages)
            .await;
        match &listing.end {
            ListingEnd::Exhausted => {}
            ListingEnd::Failed { page, error } => {
                self.log(&format!("Error fetching GitLab groups (page {page}): {error}"))
                    .await;
            }
            ListingEnd::PageLimit { max_pages } => {
                self.log(&format!(
                    "Stopped fetching GitLab groups after {max_pages} pages"
                ))
                .await;
            }
        }
        report.groups_fetched = listing.groups.len();
        report.group_listing_complete = listing.is_complete();
        tracing::info!("Total groups fetched: {}", report.groups_fetched);

        // 2. Scanner configs
        self.log("Fetching current scanner configs").await;
        let configs = match self.registry.fetch_configs().await {
            Ok(configs) => configs,
            Err(error) => {
                self.log(&format!("Error fetching scanner configs: {error}")).await;
                self.log("Script aborted before making changes\n").await;
                return Err(ReconcileError::ConfigFetchFailed(error));
            }
        };
        report.configs_fetched = configs.len();

        // 3. Diff
        let mut plan = ReconcilePlan::build(&listing.groups, &configs, &self.config.gitlab_marker);
        if !plan.foreign.is_empty() {
            tracing::debug!(
                "Leaving {} stale configs from other SCM providers untouched",
                plan.foreign.len()
            );
        }
        if !listing.is_complete() && !plan.removals.is_empty() {
            self.log(&format!(
                "GitLab group listing is incomplete, skipping removal of {} configs",
                plan.removals.len()
            ))
            .await;
            report.removals_skipped = true;
            plan = plan.without_removals();
        }
        report.planned_additions = plan.additions.len();
        report.planned_removals = plan.removals.len();

        // 4. Apply
        self.apply_additions(&plan.additions, &mut report).await;
        self.apply_removals(&plan, &mut report).await;

        self.log("Script finished\n").await;
        Ok(report)
    }

    async fn apply_additions(&self, additions: &[String], report: &mut ReconcileReport) {
        if additions.is_empty() {
            self.log("No SCMs to add").await;
            return;
        }
        self.log(&format!("Adding to scanner: {}", additions.join(", ")))
            .await;

        for namespace in additions {
            if self.config.dry_run {
                self.log(&format!("Dry run: would create SCM config for {namespace}"))
                    .await;
                continue;
            }

            let payload = NewScmConfig::new(
                self.config.scm_type,
                self.config.gitlab_base_url.clone(),
                namespace.clone(),
                self.config.gitlab_access_token.clone(),
            );
            let result = self.registry.create_config(&payload).await;
            self.record_outcome(MutationAction::Create, namespace, result, report)
                .await;
        }
    }

    async fn apply_removals(&self, plan: &ReconcilePlan, report: &mut ReconcileReport) {
        if plan.removals.is_empty() {
            self.log("Nothing to delete").await;
            return;
        }
        let namespaces: Vec<&str> = plan.removal_namespaces().into_iter().collect();
        self.log(&format!(
            "Configs to remove from scanner: {}",
            namespaces.join(", ")
        ))
        .await;

        for config in &plan.removals {
            if self.config.dry_run {
                self.log(&format!(
                    "Dry run: would delete SCM config {} ({})",
                    config.id, config.namespace
                ))
                .await;
                continue;
            }

            let result = self.registry.delete_config(&config.id).await;
            self.record_outcome(MutationAction::Delete, &describe(config), result, report)
                .await;
        }
    }

    async fn record_outcome(
        &self,
        action: MutationAction,
        target: &str,
        result: Result<MutationOutcome, ApiError>,
        report: &mut ReconcileReport,
    ) {
        match result {
            Ok(outcome) => {
                tracing::info!("{} {}: {:?}", action, target, outcome);
                self.log(&outcome.log_message(action)).await;
                match (&outcome, action) {
                    (MutationOutcome::Success { .. }, MutationAction::Create) => report.created += 1,
                    (MutationOutcome::Success { .. }, MutationAction::Delete) => report.deleted += 1,
                    (MutationOutcome::Conflict { .. }, MutationAction::Create) => {
                        report.already_existed += 1
                    }
                    (MutationOutcome::NotFound, _) => report.not_found += 1,
                    _ => report.failed += 1,
                }
            }
            Err(error) => {
                tracing::error!("{} {} failed: {}", action, target, error);
                self.log(&format!("{action} error: {error}")).await;
                report.failed += 1;
            }
        }

        self.limiter.wait().await;
    }

    async fn log(&self, message: &str) {
        tracing::debug!("{}", message.trim_end());
        if let Err(e) = self.audit.record(message).await {
            tracing::warn!(
                "Failed to write audit log {}: {}",
                self.audit.path().display(),
                e
            );
        }
    }
}

fn describe(config: &ScmConfig) -> String {
    format!("{} ({})", config.namespace, config.id)
}
