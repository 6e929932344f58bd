//! Event store interface.
//!
//! The store persists records and owns deduplication, merging of
//! re-observed notification conditions, and expiry marking.

use async_trait::async_trait;
use mws_events::{Event, NotificationCondition};
use thiserror::Error;

/// Errors reported by a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("event store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the record.
    #[error("event store rejected record: {0}")]
    Rejected(String),
}

/// Destination of event and notification condition records.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist one event.
    async fn store_event(&self, event: Event) -> Result<(), StoreError>;

    /// Persist one observation of a notification condition.
    async fn store_notification_condition(
        &self,
        condition: NotificationCondition,
    ) -> Result<(), StoreError>;
}
