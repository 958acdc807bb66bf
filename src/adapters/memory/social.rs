//! Follows, notifications and refresh tokens.

use async_trait::async_trait;

use super::{InMemoryStore, State};
use crate::domain::auth::RefreshTokenRecord;
use crate::domain::foundation::{DomainError, NotificationId, Timestamp, UserId};
use crate::domain::notification::Notification;
use crate::domain::social::Follow;
use crate::ports::{
    FollowRepository, NotificationComment, NotificationPost, NotificationRepository,
    NotificationView, RefreshTokenStore,
};

fn notification_view(state: &State, n: &Notification) -> Option<NotificationView> {
    let creator = state.summary(&n.creator_id)?;
    let post = n.post_id.and_then(|id| state.post(&id)).map(|p| NotificationPost {
        id: p.id(),
        content: p.content().map(str::to_string),
        image: p.image().map(|i| i.as_str().to_string()),
    });
    let comment = n
        .comment_id
        .and_then(|id| state.comments.iter().find(|c| c.id() == id))
        .map(|c| NotificationComment {
            id: c.id(),
            content: c.content().to_string(),
        });

    Some(NotificationView {
        id: n.id,
        kind: n.kind,
        read: n.read,
        created_at: n.created_at,
        creator,
        post,
        comment,
    })
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn toggle(&self, follow: &Follow) -> Result<bool, DomainError> {
        let mut state = self.write();
        let existing = state.follows.iter().position(|f| {
            f.follower_id == follow.follower_id && f.following_id == follow.following_id
        });
        match existing {
            Some(index) => {
                state.follows.remove(index);
                Ok(false)
            }
            None => {
                state.follows.push(*follow);
                Ok(true)
            }
        }
    }

    async fn is_following(
        &self,
        follower_id: &UserId,
        following_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self.read().is_following(follower_id, following_id))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), DomainError> {
        self.write().notifications.push(notification.clone());
        Ok(())
    }

    async fn list_for(&self, recipient_id: &UserId) -> Result<Vec<NotificationView>, DomainError> {
        let state = self.read();
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| &n.recipient_id == recipient_id)
            .filter_map(|n| notification_view(&state, n))
            .collect())
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        ids: &[NotificationId],
    ) -> Result<u64, DomainError> {
        let mut state = self.write();
        let mut marked = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| &n.recipient_id == recipient_id && !n.read && ids.contains(&n.id))
        {
            n.read = true;
            marked += 1;
        }
        Ok(marked)
    }

    async fn unread_count(&self, recipient_id: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .read()
            .notifications
            .iter()
            .filter(|n| &n.recipient_id == recipient_id && !n.read)
            .count() as u64)
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), DomainError> {
        self.write()
            .refresh_tokens
            .insert(record.token_digest.clone(), record.clone());
        Ok(())
    }

    async fn find(&self, token_digest: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Ok(self.read().refresh_tokens.get(token_digest).cloned())
    }

    async fn revoke(&self, token_digest: &str) -> Result<bool, DomainError> {
        match self.write().refresh_tokens.get_mut(token_digest) {
            Some(record) if !record.revoked => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_inactive(&self, now: Timestamp) -> Result<u64, DomainError> {
        let mut state = self.write();
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|_, record| record.is_active(now));
        Ok((before - state.refresh_tokens.len()) as u64)
    }
}
