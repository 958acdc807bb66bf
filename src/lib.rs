//! Socialite - social networking backend.
//!
//! Accounts with cookie-based sessions, a post feed with likes and
//! comments, a follow graph, profile editing and notifications.
//!
//! Layout follows ports and adapters: `domain` holds the rules, `ports` the
//! storage and service contracts, `application` the command and query
//! handlers, and `adapters` the PostgreSQL, in-memory, auth and HTTP
//! implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
