mod in_memory_resource_repository;
mod in_memory_user_repository;
mod postgres_resource_repository;
mod postgres_user_repository;

pub use in_memory_resource_repository::InMemoryResourceRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_resource_repository::PostgresResourceRepository;
pub use postgres_user_repository::PostgresUserRepository;
