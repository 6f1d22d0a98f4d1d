pub mod authorization;
pub mod entities;
pub mod errors;
pub mod reconciler;
pub mod value_objects;
