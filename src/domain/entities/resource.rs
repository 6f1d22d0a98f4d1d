use chrono::{DateTime, Utc};

use crate::domain::{
    entities::{Engagement, EngagementView, UserProfile},
    errors::DomainError,
    reconciler::InteractionDelta,
    value_objects::{ResourceId, ResourceKind, ResourceStatus, UserId},
};

/// Descriptive catalogue fields of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDetails {
    pub title: String,
    pub description: String,
    pub course: String,
    pub branch: String,
    pub year: String,
    pub semester: String,
    pub subject: String,
    pub unit: Option<String>,
    pub exam_year: Option<String>,
    pub drive_link: String,
}

/// Resource aggregate root - a shared study document and its engagement
#[derive(Debug, Clone)]
pub struct Resource {
    id: ResourceId,
    kind: ResourceKind,
    details: ResourceDetails,
    status: ResourceStatus,
    uploader: String,
    uploader_id: UserId,
    engagement: Engagement,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Resource {
    /// Create a freshly uploaded resource.
    ///
    /// Fails when the uploader may not upload or when a question paper has no
    /// exam year. Trusted uploaders publish directly; everyone else goes
    /// through moderation.
    pub fn new(
        kind: ResourceKind,
        details: ResourceDetails,
        uploader: &UserProfile,
    ) -> Result<Self, DomainError> {
        let status = uploader.initial_status()?;

        if kind.requires_exam_year()
            && details
                .exam_year
                .as_deref()
                .map_or(true, |y| y.trim().is_empty())
        {
            return Err(DomainError::MissingExamYear(kind.to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: ResourceId::new(),
            kind,
            details,
            status,
            uploader: uploader.display_name().to_string(),
            uploader_id: uploader.id().clone(),
            engagement: Engagement::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage (e.g., database)
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: ResourceId,
        kind: ResourceKind,
        details: ResourceDetails,
        status: ResourceStatus,
        uploader: String,
        uploader_id: UserId,
        engagement: Engagement,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            details,
            status,
            uploader,
            uploader_id,
            engagement,
            created_at,
            updated_at,
        }
    }

    /// Apply an interaction in place and return the acting user's view
    pub fn apply_interaction(&mut self, user: &UserId, delta: &InteractionDelta) -> EngagementView {
        self.engagement.apply(user, delta);
        if !delta.is_noop() {
            self.updated_at = Utc::now();
        }
        self.engagement.view_for(Some(user))
    }

    // Getters
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn details(&self) -> &ResourceDetails {
        &self.details
    }

    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub fn uploader(&self) -> &str {
        &self.uploader
    }

    pub fn uploader_id(&self) -> &UserId {
        &self.uploader_id
    }

    pub fn engagement(&self) -> &Engagement {
        &self.engagement
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_listed(&self) -> bool {
        self.status.is_listed()
    }

    pub fn is_uploaded_by(&self, user: &UserId) -> bool {
        &self.uploader_id == user
    }
}
