mod interaction_action;
mod reaction;
mod resource_id;
mod resource_kind;
mod resource_status;
mod user_id;

pub use interaction_action::InteractionAction;
pub use reaction::{Polarity, Reaction, ReactionChange};
pub use resource_id::ResourceId;
pub use resource_kind::ResourceKind;
pub use resource_status::ResourceStatus;
pub use user_id::UserId;
