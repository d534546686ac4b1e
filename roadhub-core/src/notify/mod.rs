//! Transient alert messages
//!
//! A small fixed pool of timed notifications. Pushing into a full pool
//! evicts the oldest entry; entries expire lazily when the queue is ticked.

pub mod message;
pub mod queue;

pub use message::{Message, Severity, MAX_MESSAGE_LEN};
pub use queue::{Notification, NotificationQueue, NOTIFICATION_CAPACITY};
