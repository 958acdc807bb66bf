//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, errors, events)
//! - `user` - Accounts and public profiles
//! - `auth` - Credentials, session tokens and the page redirect policy
//! - `post` - Posts, comments and likes
//! - `social` - Follow graph
//! - `notification` - Activity notices derived from events

pub mod auth;
pub mod foundation;
pub mod notification;
pub mod post;
pub mod social;
pub mod user;
