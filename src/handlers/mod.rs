//! Request handlers: the generic resource state machine and its axum adapters.

pub mod endpoints;
pub mod resource;
pub use resource::ResourceHandler;
