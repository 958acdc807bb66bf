//! Command and query handlers, grouped by area.

pub mod auth;
pub mod notification;
pub mod post;
pub mod profile;
pub mod social;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::*;
pub use notification::*;
pub use post::*;
pub use profile::*;
pub use social::*;
