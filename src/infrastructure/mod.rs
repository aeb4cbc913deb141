/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - GitLab and scanner REST APIs (reqwest)
/// - OS secret store lookups (keyring)
/// - File system operations (config file, audit log)
pub mod api;
pub mod credentials;
pub mod filesystem;

// Re-export commonly used types
pub use api::{
    ApiError, ConfigRegistry, GitLabGroupsClient, GroupListing, GroupSource, ListingEnd,
    ScannerConfigClient,
};
pub use credentials::{CredentialError, CredentialRef, KeyringSecretStore, SecretStore};
pub use filesystem::{AuditLog, ConfigStore};
