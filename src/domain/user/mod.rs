//! User module - accounts and public profiles.
//!
//! # Domain Invariants
//!
//! 1. Email addresses are stored normalized and are unique
//! 2. Usernames are unique and derived from the email at sign-up
//! 3. Profile edits replace every editable field at once

mod account;
mod events;
mod values;

pub use account::{User, UserSummary};
pub use events::{ProfileUpdated, UserRegistered};
pub use values::{
    parse_display_name, website_href, Email, ProfileUpdate, Username, MAX_BIO_LENGTH,
    MAX_LOCATION_LENGTH, MAX_NAME_LENGTH, MAX_USERNAME_LENGTH, MAX_WEBSITE_LENGTH,
    MIN_USERNAME_LENGTH,
};
