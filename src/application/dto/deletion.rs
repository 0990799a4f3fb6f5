use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Terminal state of a guarded delete.
///
/// `Blocked` and `Failed` leave storage untouched and may be retried once the
/// cause is fixed. `Committed` is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeletionOutcome {
    Committed {
        message: String,
    },
    Blocked {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dependents: Option<u64>,
    },
    Failed {
        message: String,
    },
}

impl DeletionOutcome {
    pub fn committed(message: impl Into<String>) -> Self {
        Self::Committed {
            message: message.into(),
        }
    }

    pub fn blocked(message: impl Into<String>, dependents: Option<u64>) -> Self {
        Self::Blocked {
            message: message.into(),
            dependents,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Committed { message }
            | Self::Blocked { message, .. }
            | Self::Failed { message } => message,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}
