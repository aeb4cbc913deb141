/// Credential retrieval from the OS secret store
pub mod keyring_store;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::value_objects::Secret;

pub use keyring_store::KeyringSecretStore;

/// Credential lookup errors
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("No credential stored for service '{service}' key '{key}'")]
    Missing { service: String, key: String },

    #[error("Secret store backend error: {0}")]
    Backend(String),
}

/// Location of a credential in the secret store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CredentialRef {
    /// Service name the secret is filed under
    #[validate(length(min = 1))]
    pub service: String,

    /// Key (user) name within the service
    #[validate(length(min = 1))]
    pub key: String,
}

impl CredentialRef {
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
        }
    }
}

/// Read-only access to stored credentials
pub trait SecretStore: Send + Sync {
    /// Look up a credential; an absent or empty value is [`CredentialError::Missing`]
    fn get(&self, credential: &CredentialRef) -> Result<Secret, CredentialError>;
}
