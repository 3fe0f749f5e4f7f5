//! Realtime change notifications pushed by the backend.
//!
//! The client never merges event payloads into local state. A handler reacts
//! to an event by refetching whatever list it invalidates.

mod event;
mod subscription;

pub use event::{Channel, DocumentChange, RealtimeEvent};
pub use subscription::{RealtimeFeed, RealtimeHandler, Subscription};
