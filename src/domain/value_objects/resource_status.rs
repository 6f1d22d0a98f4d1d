use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Publication state of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// Awaiting moderation
    Pending,
    /// Visible in list views
    Approved,
    /// Turned down by a moderator
    Rejected,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Pending => "pending",
            ResourceStatus::Approved => "approved",
            ResourceStatus::Rejected => "rejected",
        }
    }

    /// Only approved resources show up in catalogue and saved views
    pub fn is_listed(&self) -> bool {
        matches!(self, ResourceStatus::Approved)
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResourceStatus::Pending),
            "approved" => Ok(ResourceStatus::Approved),
            "rejected" => Ok(ResourceStatus::Rejected),
            _ => Err(format!("Invalid resource status: {}", s)),
        }
    }
}
