//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Token signing, password hashing and session validation
//! - `events` - In-process event bus
//! - `http` - axum routes, handlers and middleware
//! - `memory` - In-memory storage for tests and local runs
//! - `postgres` - PostgreSQL storage

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
