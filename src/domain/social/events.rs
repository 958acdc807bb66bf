//! Social graph events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

/// Published when `follower_id` starts following `following_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFollowed {
    pub event_id: EventId,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub followed_at: Timestamp,
}

domain_event!(
    UserFollowed,
    event_type = "user.followed.v1",
    aggregate_id = following_id,
    aggregate_type = "User",
    occurred_at = followed_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUnfollowed {
    pub event_id: EventId,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub unfollowed_at: Timestamp,
}

domain_event!(
    UserUnfollowed,
    event_type = "user.unfollowed.v1",
    aggregate_id = following_id,
    aggregate_type = "User",
    occurred_at = unfollowed_at,
    event_id = event_id
);
