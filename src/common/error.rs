use std::path::PathBuf;
use thiserror::Error;

use crate::application::use_cases::reconcile::ReconcileError;
use crate::infrastructure::api::ApiError;
use crate::infrastructure::credentials::CredentialError;
use crate::infrastructure::filesystem::config_store::ConfigStoreError;

#[derive(Error, Debug)]
pub enum ScmSyncError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Credential lookup failed: {message}")]
    CredentialError {
        message: String,
        #[source]
        source: Option<CredentialError>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Remote API call failed: {message}")]
    ApiError {
        message: String,
        #[source]
        source: Option<ApiError>,
    },

    #[error("Reconciliation aborted: {message}")]
    ReconcileError {
        message: String,
        #[source]
        source: Option<ReconcileError>,
    },
}

impl ScmSyncError {
    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    pub fn credential_error_with_source(message: impl Into<String>, source: CredentialError) -> Self {
        Self::CredentialError {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn api_error_with_source(message: impl Into<String>, source: ApiError) -> Self {
        Self::ApiError {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn reconcile_error_with_source(message: impl Into<String>, source: ReconcileError) -> Self {
        Self::ReconcileError {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<std::io::Error> for ScmSyncError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<CredentialError> for ScmSyncError {
    fn from(error: CredentialError) -> Self {
        Self::credential_error_with_source("Failed to load API credentials", error)
    }
}

impl From<ApiError> for ScmSyncError {
    fn from(error: ApiError) -> Self {
        Self::api_error_with_source("Failed to prepare API client", error)
    }
}

impl From<ReconcileError> for ScmSyncError {
    fn from(error: ReconcileError) -> Self {
        Self::reconcile_error_with_source("Reconciliation did not complete", error)
    }
}

impl From<ConfigStoreError> for ScmSyncError {
    fn from(error: ConfigStoreError) -> Self {
        let path = error.path().map(PathBuf::from);
        Self::config_error_with_source("Failed to load configuration", path, error)
    }
}
