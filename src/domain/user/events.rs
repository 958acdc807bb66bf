//! User domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════
// UserRegistered
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new account is created by sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: EventId,
    pub user_id: UserId,
    pub username: String,
    pub registered_at: Timestamp,
}

domain_event!(
    UserRegistered,
    event_type = "user.registered.v1",
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = registered_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProfileUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a user edits their public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub updated_at: Timestamp,
}

domain_event!(
    ProfileUpdated,
    event_type = "user.profile_updated.v1",
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = updated_at,
    event_id = event_id
);
