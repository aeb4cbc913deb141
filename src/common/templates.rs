//! Starter configuration shipped inside the binary

/// Default file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "scmsync.yaml";

/// Commented `scmsync.yaml` written by `scmsync init`
pub fn get_config_template() -> &'static str {
    include_str!("../../templates/scmsync.yaml")
}
