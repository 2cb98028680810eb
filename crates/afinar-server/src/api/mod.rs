//! API routes and handlers

pub mod assets;
pub mod hub;
pub mod internal;
pub mod recipes;
pub mod request_context;
mod router;
pub mod runs;
pub mod validate;

pub use router::create_router;
