//! EventPublisher port - Interface for publishing domain events.
//!
//! Application handlers publish events after the state change is stored.
//! They do not know whether delivery is in-process or remote.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// # Example
///
/// ```ignore
/// let envelope = PostLiked { .. }.to_envelope()?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers the event to every handler subscribed to its type.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
