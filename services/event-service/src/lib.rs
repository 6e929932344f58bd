//! Event emission and notification condition services for MWS plugins.
//!
//! Both services take their collaborators explicitly:
//! - a [`PluginContext`] with the plugin identity and polling interval
//! - an [`EventStore`] that persists records
//! - a [`MessageCatalog`] that resolves message codes (emission only)
//! - the plugin's [`mws_events::Registry`] (emission only)

pub mod config;
pub mod emission;
pub mod error;
pub mod logging;
pub mod messages;
pub mod notification;
pub mod store;

pub use config::{Config, PluginContext};
pub use emission::{EmissionService, RawEvent};
pub use error::{EmissionError, NotificationError};
pub use messages::{MessageCatalog, MessageError};
pub use notification::{NotificationService, ObservedCondition};
pub use store::{EventStore, StoreError};
