//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers take a `CommandMetadata` for the acting user and publish
//! domain events; query handlers only read.

pub mod handlers;

pub use handlers::*;
