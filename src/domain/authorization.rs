use crate::domain::entities::Resource;
use crate::domain::value_objects::UserId;

/// Role names carried in access tokens
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";

    /// Check if a role is valid
    pub fn is_valid_role(role: &str) -> bool {
        matches!(role, ADMIN | USER)
    }
}

/// User context extracted from authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: UserId,
    pub name: Option<String>,
    pub role: String,
}

impl UserContext {
    /// Create a new user context; unknown roles fall back to `user`
    pub fn new(user_id: UserId, name: Option<String>, role: Option<String>) -> Self {
        let role = role
            .filter(|r| roles::is_valid_role(r))
            .unwrap_or_else(|| roles::USER.to_string());

        Self {
            user_id,
            name,
            role,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }

    /// Uploaders may remove their own resources; admins may remove any
    pub fn can_delete(&self, resource: &Resource) -> AuthorizationResult {
        if self.is_admin() || resource.is_uploaded_by(&self.user_id) {
            AuthorizationResult::Allowed
        } else {
            AuthorizationResult::forbidden("only the uploader or an admin can delete a resource")
        }
    }
}

/// Authorization result
#[derive(Debug, PartialEq, Eq)]
pub enum AuthorizationResult {
    Allowed,
    Forbidden(String), // Reason for denial
}

impl AuthorizationResult {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}
