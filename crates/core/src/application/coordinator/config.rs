// Coordinator configuration

use serde::{Deserialize, Serialize};

/// What happens to not-yet-committed transactions after a commit fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitFailurePolicy {
    /// Roll back every entry still in the session (already committed ones stay committed)
    #[default]
    RollbackRemaining,
    /// Release remaining entries without an explicit rollback call
    Abandon,
}

/// Coordinator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub commit_failure: CommitFailurePolicy,
}
