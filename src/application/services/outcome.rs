use reqwest::StatusCode;
use std::fmt;

/// A mutating call against the scanner config API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Create,
    Delete,
}

impl MutationAction {
    /// HTTP method used for the action, as written to the audit log
    pub fn method(&self) -> &'static str {
        match self {
            MutationAction::Create => "POST",
            MutationAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Classified response of a create or delete call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// 2xx. `body` is `None` for a bare `{}` acknowledgment.
    Success { status: u16, body: Option<String> },
    /// 404
    NotFound,
    /// 409: the config already exists, nothing to do
    Conflict { body: String },
    /// Any other status
    Failed { status: u16 },
}

impl MutationOutcome {
    pub fn classify(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            200..=299 => {
                let trimmed = body.trim();
                let body = if trimmed.is_empty() || trimmed == "{}" {
                    None
                } else {
                    Some(body)
                };
                MutationOutcome::Success { status, body }
            }
            404 => MutationOutcome::NotFound,
            409 => MutationOutcome::Conflict { body },
            _ => MutationOutcome::Failed { status },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Success { .. })
    }

    /// Audit log message for this outcome
    pub fn log_message(&self, action: MutationAction) -> String {
        match self {
            MutationOutcome::Success { status, body } => {
                let reason = StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or("OK");
                match body {
                    None => format!("{action} successful: {status} {reason}"),
                    Some(body) => format!("{action} successful: {status} {reason}\n{body}"),
                }
            }
            MutationOutcome::NotFound => format!("{action} error: 404 - Not Found"),
            MutationOutcome::Conflict { body } => {
                format!("{action} SCM already exists, no action taken: 409\n{body}")
            }
            MutationOutcome::Failed { status } => format!("{action} error: {status}"),
        }
    }
}
