/// Local file handling: the run audit log and the YAML configuration
pub mod audit_log;
pub mod config_store;

pub use audit_log::AuditLog;
pub use config_store::{AppConfig, ConfigStore, ConfigStoreError};
