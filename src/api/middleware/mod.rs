pub mod auth;
pub mod cors;
pub mod metrics;

pub use auth::{auth_middleware, CurrentUser, JwtVerifier, MaybeUser};
