pub mod health;
pub mod interactions;
pub mod leaderboard;
pub mod profile;
pub mod resources;
pub mod saved;


pub use health::{health_handler, readiness_handler};
pub use interactions::interaction_handler;
pub use leaderboard::leaderboard_handler;
pub use profile::my_uploads_handler;
pub use resources::{
    create_resource_handler, delete_resource_handler, get_resource_handler,
    list_resources_handler,
};
pub use saved::saved_resources_handler;
