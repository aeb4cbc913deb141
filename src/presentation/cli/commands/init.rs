use colored::Colorize;
use std::path::PathBuf;

use crate::common::result::ScmSyncResult;
use crate::common::templates::get_config_template;
use crate::infrastructure::filesystem::ConfigStore;

/// Write a starter `scmsync.yaml`
pub struct InitCommand {
    /// Where to write the config file
    pub path: PathBuf,
    /// Overwrite an existing file
    pub force: bool,
}

impl InitCommand {
    pub fn new(path: PathBuf, force: bool) -> Self {
        Self { path, force }
    }

    /// Execute the init command
    pub async fn execute(&self) -> ScmSyncResult<()> {
        ConfigStore::new()
            .write_template(&self.path, get_config_template(), self.force)
            .await?;

        println!(
            "{} Created configuration template at {}",
            "✓".green().bold(),
            self.path.display()
        );
        println!();
        println!("Next steps:");
        println!("  1. Edit the GitLab and scanner endpoints in {}", self.path.display());
        println!("  2. Store both API tokens in the OS secret store");
        println!("  3. Run 'scmsync --dry-run' to preview the changes");

        Ok(())
    }
}
