use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Interaction a user can perform on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Like,
    Dislike,
    Save,
    Flag,
    Download,
}

impl InteractionAction {
    pub const ALL: [InteractionAction; 5] = [
        InteractionAction::Like,
        InteractionAction::Dislike,
        InteractionAction::Save,
        InteractionAction::Flag,
        InteractionAction::Download,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionAction::Like => "like",
            InteractionAction::Dislike => "dislike",
            InteractionAction::Save => "save",
            InteractionAction::Flag => "flag",
            InteractionAction::Download => "download",
        }
    }
}

impl std::fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DomainError::InvalidAction(s.to_string()))
    }
}
