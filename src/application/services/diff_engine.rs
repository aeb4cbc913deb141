//! Set difference between GitLab groups and registered scanner configs.
//!
//! Everything here is pure; the reconcile use case feeds it the two
//! listings and acts on the resulting [`ReconcilePlan`].

use std::collections::{BTreeSet, HashSet};

use crate::domain::entities::{Group, ScmConfig};

/// Namespaces to add and to remove, before any origin filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceDiff {
    /// `current - existing`
    pub to_add: BTreeSet<String>,
    /// `existing - current`
    pub to_remove: BTreeSet<String>,
}

/// Compute `current - existing` and `existing - current`.
pub fn diff_namespaces<'a, C, E>(current: C, existing: E) -> NamespaceDiff
where
    C: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = &'a str>,
{
    let current: BTreeSet<&str> = current.into_iter().collect();
    let existing: BTreeSet<&str> = existing.into_iter().collect();

    NamespaceDiff {
        to_add: current
            .difference(&existing)
            .map(|ns| ns.to_string())
            .collect(),
        to_remove: existing
            .difference(&current)
            .map(|ns| ns.to_string())
            .collect(),
    }
}

/// The mutations a run should perform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Namespaces to register, in GitLab listing order
    pub additions: Vec<String>,

    /// GitLab-origin configs whose namespace no longer exists
    pub removals: Vec<ScmConfig>,

    /// Stale configs left alone because they belong to another SCM provider
    pub foreign: Vec<ScmConfig>,
}

impl ReconcilePlan {
    /// Build the plan from both listings.
    ///
    /// `gitlab_marker` is matched as a substring of each config's base URL;
    /// only matching configs are ever selected for removal.
    pub fn build(groups: &[Group], configs: &[ScmConfig], gitlab_marker: &str) -> Self {
        let diff = diff_namespaces(
            groups.iter().map(|g| g.namespace()),
            configs.iter().map(|c| c.namespace.as_str()),
        );

        let mut seen = HashSet::new();
        let additions = groups
            .iter()
            .map(|g| g.namespace())
            .filter(|ns| diff.to_add.contains(*ns) && seen.insert(*ns))
            .map(str::to_string)
            .collect();

        let (removals, foreign): (Vec<ScmConfig>, Vec<ScmConfig>) = configs
            .iter()
            .filter(|c| diff.to_remove.contains(&c.namespace))
            .cloned()
            .partition(|c| c.is_gitlab_origin(gitlab_marker));

        Self {
            additions,
            removals,
            foreign,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Distinct namespaces selected for removal
    pub fn removal_namespaces(&self) -> BTreeSet<&str> {
        self.removals.iter().map(|c| c.namespace.as_str()).collect()
    }

    /// Drop every removal, keeping additions
    pub fn without_removals(mut self) -> Self {
        self.removals.clear();
        self
    }
}
