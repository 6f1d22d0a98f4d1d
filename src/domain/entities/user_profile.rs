use crate::domain::{
    errors::DomainError,
    value_objects::{ResourceStatus, UserId},
};

/// Reputation awarded for every accepted upload
pub const UPLOAD_REPUTATION_REWARD: i64 = 10;

const DEFAULT_NAME: &str = "Anonymous";
const DEFAULT_AVATAR: &str = "boy1";

/// The parts of a user account this service reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub reputation: i64,
    pub is_banned: bool,
    pub is_restricted: bool,
    pub can_upload: bool,
    pub is_trusted: bool,
}

impl UserProfile {
    pub fn new(id: UserId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            avatar: None,
            reputation: 0,
            is_banned: false,
            is_restricted: false,
            can_upload: true,
            is_trusted: false,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_NAME)
    }

    pub fn avatar_or_default(&self) -> &str {
        self.avatar.as_deref().unwrap_or(DEFAULT_AVATAR)
    }

    /// Status a new upload by this user starts in
    pub fn initial_status(&self) -> Result<ResourceStatus, DomainError> {
        if self.is_banned {
            return Err(DomainError::UploaderBanned);
        }
        if self.is_restricted || !self.can_upload {
            return Err(DomainError::UploaderRestricted);
        }

        Ok(if self.is_trusted {
            ResourceStatus::Approved
        } else {
            ResourceStatus::Pending
        })
    }
}
