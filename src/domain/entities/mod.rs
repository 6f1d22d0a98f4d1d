mod engagement;
mod resource;
mod user_profile;

pub use engagement::{Counters, Engagement, EngagementView, FlagLedger};
pub use resource::{Resource, ResourceDetails};
pub use user_profile::{UserProfile, UPLOAD_REPUTATION_REWARD};
