mod resource_repository;
mod user_repository;

pub use resource_repository::{RepositoryError, ResourceFilter, ResourceRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use resource_repository::MockResourceRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
