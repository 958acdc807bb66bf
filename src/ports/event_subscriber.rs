//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! Handlers register for event types by name (e.g. `post.liked.v1`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler that processes incoming events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one event. Errors are logged by the bus and do not reach the
    /// publisher.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for registering event handlers.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe a handler to one event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe a handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Publisher and subscriber in one object.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
