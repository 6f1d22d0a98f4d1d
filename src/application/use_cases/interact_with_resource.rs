use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::{InteractionRequest, InteractionResponse};
use crate::application::errors::InteractionError;
use crate::application::ports::ResourceRepository;
use crate::application::validation::require_field;
use crate::domain::authorization::UserContext;
use crate::domain::reconciler::InteractionDelta;
use crate::domain::value_objects::{InteractionAction, ResourceId};

/// Use case: Record a like/dislike/save/flag/download on a resource
pub struct InteractWithResourceUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
}

impl InteractWithResourceUseCase {
    pub fn new(resource_repo: Arc<dyn ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    /// Execute the interaction.
    ///
    /// The request is fully validated before the store is touched. The delta is
    /// handed to the repository as a single atomic update, and the returned view
    /// reflects the state the store produced.
    pub async fn execute(
        &self,
        user: &UserContext,
        request: InteractionRequest,
    ) -> Result<InteractionResponse, InteractionError> {
        // 1. Validate request shape
        let raw_id = require_field(request.resource_id.as_deref(), "Resource ID required")
            .map_err(InteractionError::InvalidRequest)?;
        let raw_action = require_field(request.action.as_deref(), "Action required")
            .map_err(InteractionError::InvalidRequest)?;

        let resource_id: ResourceId = raw_id.parse()?;
        let action: InteractionAction = raw_action.parse()?;

        // 2. Plan the state change
        let delta = InteractionDelta::plan(action, request.value.unwrap_or(true));
        if delta.is_noop() {
            debug!(
                resource_id = %resource_id,
                action = %action,
                "interaction plans no change"
            );
        }

        // 3. Apply atomically
        let resource = self
            .resource_repo
            .apply_interaction(&resource_id, &user.user_id, &delta)
            .await?
            .ok_or_else(|| InteractionError::NotFound(resource_id.to_string()))?;

        info!(
            resource_id = %resource_id,
            user_id = %user.user_id,
            action = %action,
            "interaction_recorded"
        );

        Ok(InteractionResponse {
            success: true,
            resource: resource.engagement().view_for(Some(&user.user_id)),
        })
    }
}
