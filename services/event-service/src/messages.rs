//! Message catalog interface.
//!
//! Event definitions only carry message codes. Turning a code and its
//! arguments into display text is the catalog's job.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a message catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// No message exists for the code.
    #[error("no message for code '{0}'")]
    NotFound(String),

    /// The catalog could not be reached.
    #[error("message catalog unavailable: {0}")]
    Unavailable(String),
}

/// Resolves i18n message codes.
#[async_trait]
pub trait MessageCatalog: Send + Sync {
    /// Resolve a message code with the event's arguments.
    async fn message(&self, code: &str, arguments: &[String]) -> Result<String, MessageError>;

    /// Resolve a comment code. Comments never take arguments.
    async fn comment(&self, code: &str) -> Result<String, MessageError>;
}
