mod create_resource;
mod delete_resource;
mod interact_with_resource;
mod leaderboard;
mod list_resources;
mod list_saved_resources;
mod list_uploads;

#[cfg(test)]
pub(crate) mod test_utils;

pub use create_resource::CreateResourceUseCase;
pub use delete_resource::DeleteResourceUseCase;
pub use interact_with_resource::InteractWithResourceUseCase;
pub use leaderboard::{LeaderboardUseCase, LEADERBOARD_SIZE};
pub use list_resources::ListResourcesUseCase;
pub use list_saved_resources::ListSavedResourcesUseCase;
pub use list_uploads::ListUploadsUseCase;
