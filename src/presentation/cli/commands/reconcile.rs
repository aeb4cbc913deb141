use colored::Colorize;
use std::path::PathBuf;

use crate::application::use_cases::reconcile::{ReconcileReport, ReconcileUseCase};
use crate::common::result::{ResultExt, ScmSyncResult};
use crate::infrastructure::api::{build_http_client, GitLabGroupsClient, ScannerConfigClient};
use crate::infrastructure::credentials::{KeyringSecretStore, SecretStore};
use crate::infrastructure::filesystem::{AppConfig, AuditLog, ConfigStore};

/// Handler for a reconciliation run (the default command)
pub struct ReconcileCommand {
    pub config_path: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
}

impl ReconcileCommand {
    pub fn new(config_path: PathBuf, dry_run: bool, verbose: bool) -> Self {
        Self {
            config_path,
            dry_run,
            verbose,
        }
    }

    /// Load the config file and credentials from the OS keyring, then run
    pub async fn execute(&self) -> ScmSyncResult<ReconcileReport> {
        let config = ConfigStore::new().load(&self.config_path).await?;
        let report = self.execute_with(&config, &KeyringSecretStore::new()).await?;
        self.print_report(&report);
        Ok(report)
    }

    /// Run against an already loaded config and an arbitrary secret store
    pub async fn execute_with(
        &self,
        config: &AppConfig,
        secrets: &dyn SecretStore,
    ) -> ScmSyncResult<ReconcileReport> {
        // Credentials first: a missing token must stop the run before any request
        let gitlab_token = secrets.get(&config.gitlab.token)?;
        let scanner_token = secrets.get(&config.scanner.token)?;

        let http = build_http_client(&config.http_settings())?;
        let groups =
            GitLabGroupsClient::new(http.clone(), &config.gitlab.groups_url, gitlab_token.clone())?;
        let registry = ScannerConfigClient::new(http, &config.scanner.configs_url, scanner_token)?;

        let working_dir = std::env::current_dir()
            .with_filesystem_error("Failed to resolve working directory", None)?;
        let audit = AuditLog::new(working_dir.join(&config.log_file));

        if self.verbose {
            println!("{} Logging API calls to {}", "::".blue().bold(), audit.path().display());
        }
        if self.dry_run {
            println!("{} Dry run: no configs will be created or deleted", "::".blue().bold());
        }

        let use_case = ReconcileUseCase::new(
            config.reconcile_config(gitlab_token, self.dry_run),
            groups,
            registry,
            config.rate_limit(),
            audit,
        );

        println!("{} Reconciling GitLab groups with scanner configs...", "::".blue().bold());
        Ok(use_case.execute().await?)
    }

    fn print_report(&self, report: &ReconcileReport) {
        if report.is_success() {
            println!("{} Reconciliation completed!", "✓".green().bold());
        } else {
            println!("{} Reconciliation completed with problems", "⚠".yellow().bold());
        }

        println!("  Groups fetched: {}", report.groups_fetched);
        println!("  Configs fetched: {}", report.configs_fetched);
        if report.dry_run {
            println!("  Would create: {}", report.planned_additions);
            println!("  Would delete: {}", report.planned_removals);
            return;
        }

        println!("  Created: {}", report.created);
        println!("  Deleted: {}", report.deleted);
        if self.verbose || report.already_existed > 0 {
            println!("  Already existed: {}", report.already_existed);
        }
        if report.not_found > 0 {
            println!("  {}", format!("Not found: {}", report.not_found).yellow());
        }
        if report.failed > 0 {
            println!("  {}", format!("Failed: {}", report.failed).red());
        }
        if !report.group_listing_complete {
            println!("  {}", "GitLab group listing was incomplete".yellow());
        }
        if report.removals_skipped {
            println!("  {}", "Removals were skipped for safety".yellow());
        }
    }
}
