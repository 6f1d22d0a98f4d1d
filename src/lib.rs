//! # StudyShare - Student Resource Sharing Service
//!
//! Catalogue, uploads and reader interactions for shared study material,
//! built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core business logic (entities, value objects, the interaction reconciler)
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: Postgres and in-memory persistence adapters
//! - **API**: HTTP handlers and middleware
//!
//! ## Key Features
//!
//! - Like/dislike/save/flag/download applied as one atomic store operation
//! - Mutually exclusive reactions and an append-only flag ledger
//! - Saved-resources view annotated for the caller
//! - Uploads with moderation status, reputation and a leaderboard
//!
//! ## Example Usage
//!
//! ```no_run
//! use studyshare::{api::create_router, ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::in_memory("a-secret-of-sufficient-length"))
//!     .with_in_memory_storage()
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, reconciler, value_objects};
