use super::{CredentialError, CredentialRef, SecretStore};
use crate::domain::value_objects::Secret;

/// [`SecretStore`] backed by the platform keyring
/// (Keychain, Windows Credential Manager, Secret Service on Linux).
///
/// Entries written by other keyring clients under the same service/key
/// pair are found, and they persist across login sessions.
#[derive(Debug, Clone, Default)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, credential: &CredentialRef) -> Result<Secret, CredentialError> {
        let missing = || CredentialError::Missing {
            service: credential.service.clone(),
            key: credential.key.clone(),
        };

        match entry(credential)?.get_password() {
            Ok(value) if value.is_empty() => Err(missing()),
            Ok(value) => {
                tracing::debug!(
                    "Loaded credential for service '{}' key '{}'",
                    credential.service,
                    credential.key
                );
                Ok(Secret::from(value))
            }
            Err(keyring::Error::NoEntry) => Err(missing()),
            Err(e) => Err(CredentialError::Backend(e.to_string())),
        }
    }
}

fn entry(credential: &CredentialRef) -> Result<keyring::Entry, CredentialError> {
    keyring::Entry::new(&credential.service, &credential.key)
        .map_err(|e| CredentialError::Backend(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_entries_live_in_secret_service() {
        // Building an entry does not touch D-Bus, only the lookup does
        let entry = entry(&CredentialRef::new("gitlab", "GITLAB_ACCESS_TOKEN")).unwrap();
        let backend = format!("{entry:?}");
        assert!(backend.contains("SsCredential"), "unexpected backend: {backend}");
        assert!(!backend.contains("Keyutils"));
    }
}
