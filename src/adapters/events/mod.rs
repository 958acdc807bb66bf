//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus. Handlers run inline
//!   when an event is published.

mod in_memory;

pub use in_memory::InMemoryEventBus;
