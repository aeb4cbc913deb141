use serde::{Deserialize, Serialize};

/// A GitLab group as returned by `GET /groups`.
///
/// Only `full_path` takes part in reconciliation; it is the natural key
/// matched against scanner config namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Hierarchical namespace, e.g. `platform/backend`
    pub full_path: String,

    /// GitLab numeric id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Group {
    /// Create a group from its namespace path
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            id: None,
            name: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.full_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"id": 7, "name": "Team A", "full_path": "team-a", "visibility": "private"}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.namespace(), "team-a");
        assert_eq!(group.id, Some(7));
        assert_eq!(group.name.as_deref(), Some("Team A"));
    }

    #[test]
    fn test_deserialize_requires_full_path() {
        let json = r#"{"id": 7, "name": "Team A"}"#;
        assert!(serde_json::from_str::<Group>(json).is_err());
    }
}
