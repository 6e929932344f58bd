//! Error types for the event services.

use mws_events::ValidationError;
use thiserror::Error;

use crate::messages::MessageError;
use crate::store::StoreError;

/// Errors raised while emitting an event. No record reaches the store.
#[derive(Debug, Error)]
pub enum EmissionError {
    /// The message is empty after resolution.
    #[error("event message cannot be empty")]
    EmptyMessage,

    /// The origin cannot be composed because the plugin identity is incomplete.
    #[error("cannot compose event origin: plugin {field} is not set")]
    MissingPluginIdentity { field: &'static str },

    /// The local event code does not fit the code layout.
    #[error("event code {code} exceeds the maximum local code {max}")]
    CodeOutOfRange { code: u32, max: u32 },

    /// No definition with this name exists in the registry.
    #[error("catalog '{catalog}' has no event named '{name}'")]
    UnknownDefinition { catalog: String, name: String },

    /// The message catalog could not resolve the message.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// The store rejected the record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while creating a notification condition.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
