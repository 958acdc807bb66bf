//! In-process event bus.
//!
//! Delivers events to subscribed handlers on the publishing task, in
//! subscription order. Handler failures are logged and never reach the
//! publisher: the state change that produced the event is already stored.
//!
//! A bus built with [`InMemoryEventBus::recording`] also keeps every
//! published envelope for test assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe_all(NotificationProjector::EVENT_TYPES, projector);
/// bus.publish(envelope).await?;
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: Option<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventBus {
    /// Creates a bus that only dispatches.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: None,
        }
    }

    /// Creates a bus that also remembers every published event.
    pub fn recording() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: Some(RwLock::new(Vec::new())),
        }
    }

    // === Test Helpers ===

    /// Returns all published events. Empty unless built with `recording()`.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .as_ref()
            .map(|p| p.read().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published_events().len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published_events()
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Clears recorded events.
    pub fn clear(&self) {
        if let Some(published) = &self.published {
            published
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    fn handlers_for(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if let Some(published) = &self.published {
            published
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        }

        // Handlers are cloned out so no lock is held across an await.
        let handlers = self.handlers_for(&event.event_type);

        tracing::debug!(
            event_type = %event.event_type,
            event_id = %event.event_id,
            handlers = handlers.len(),
            "Dispatching event"
        );

        for handler in handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    event_id = %event.event_id,
                    error = %e,
                    "Event handler failed"
                );
            }
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}
