//! Event emission.
//!
//! Events can be created from raw fields or from a catalog definition. Both
//! paths end in [`EmissionService::create_event`], which validates, builds
//! the record, and hands it to the store exactly once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mws_events::{
    build_origin, AssociatedObject, EscalationLevel, Event, EventCode, EventDefinition, Registry,
    Severity, MAX_LOCAL_CODE,
};
use tracing::{debug, warn};

use crate::config::PluginContext;
use crate::error::EmissionError;
use crate::messages::MessageCatalog;
use crate::store::EventStore;

/// Raw event fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// When the event occurred. Defaults to now.
    pub date: Option<DateTime<Utc>>,
    pub severity: Severity,
    pub escalation_level: EscalationLevel,
    /// Local event code, unique within the plugin component.
    pub event_code: u32,
    pub event_type: Option<String>,
    /// Appended to the plugin's origin.
    pub origin_suffix: Option<String>,
    /// Fully resolved message.
    pub message: String,
    pub arguments: Vec<String>,
    pub associated_objects: Vec<AssociatedObject>,
}

impl RawEvent {
    pub fn new(
        severity: Severity,
        escalation_level: EscalationLevel,
        event_code: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date: None,
            severity,
            escalation_level,
            event_code,
            event_type: None,
            origin_suffix: None,
            message: message.into(),
            arguments: Vec::new(),
            associated_objects: Vec::new(),
        }
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn origin_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.origin_suffix = Some(suffix.into());
        self
    }

    pub fn arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn associated_objects(mut self, objects: Vec<AssociatedObject>) -> Self {
        self.associated_objects = objects;
        self
    }
}

/// Creates events for one plugin instance.
#[derive(Clone)]
pub struct EmissionService {
    context: PluginContext,
    registry: Arc<Registry>,
    store: Arc<dyn EventStore>,
    messages: Arc<dyn MessageCatalog>,
}

impl EmissionService {
    pub fn new(
        context: PluginContext,
        registry: Arc<Registry>,
        store: Arc<dyn EventStore>,
        messages: Arc<dyn MessageCatalog>,
    ) -> Self {
        Self {
            context,
            registry,
            store,
            messages,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    /// Creates an event from raw fields.
    pub async fn create_event(&self, raw: RawEvent) -> Result<Event, EmissionError> {
        if raw.message.is_empty() {
            warn!(event_code = raw.event_code, "Rejected event with empty message");
            return Err(EmissionError::EmptyMessage);
        }

        let origin = self.origin(raw.origin_suffix.as_deref())?;

        let code = EventCode::compose(
            raw.severity,
            raw.escalation_level,
            self.context.component_code,
            raw.event_code,
        )
        .ok_or(EmissionError::CodeOutOfRange {
            code: raw.event_code,
            max: MAX_LOCAL_CODE,
        })?;

        let event = Event {
            date: raw.date.unwrap_or_else(Utc::now),
            severity: raw.severity,
            escalation_level: raw.escalation_level,
            code,
            event_type: raw.event_type,
            origin,
            message: raw.message,
            arguments: raw.arguments,
            associated_objects: raw.associated_objects,
        };

        self.store.store_event(event.clone()).await?;

        debug!(
            origin = %event.origin,
            event_code = %event.code,
            severity = %event.severity,
            "Event emitted"
        );

        Ok(event)
    }

    /// Creates an event for a catalog definition.
    ///
    /// The message is resolved from the definition's message code and the
    /// arguments before the raw path runs.
    pub async fn create_catalog_event(
        &self,
        date: Option<DateTime<Utc>>,
        definition: &EventDefinition,
        arguments: Vec<String>,
        associated_objects: Vec<AssociatedObject>,
    ) -> Result<Event, EmissionError> {
        // Fail on identity before asking the catalog for text.
        self.origin(None)?;

        let message = self
            .messages
            .message(&definition.message_code(), &arguments)
            .await?;

        self.create_event(RawEvent {
            date,
            severity: definition.severity(),
            escalation_level: definition.escalation_level(),
            event_code: definition.code(),
            event_type: Some(definition.event_type()),
            origin_suffix: Some(definition.origin_suffix()),
            message,
            arguments,
            associated_objects,
        })
        .await
    }

    /// Creates an event for the named definition of this service's registry,
    /// dated now.
    pub async fn emit(
        &self,
        name: &str,
        arguments: Vec<String>,
        associated_objects: Vec<AssociatedObject>,
    ) -> Result<Event, EmissionError> {
        let definition =
            self.registry
                .get(name)
                .ok_or_else(|| EmissionError::UnknownDefinition {
                    catalog: self.registry.catalog().to_string(),
                    name: name.to_string(),
                })?;
        self.create_catalog_event(None, definition, arguments, associated_objects)
            .await
    }

    /// Resolves the dictionary comment of a definition.
    pub async fn comment_for(&self, definition: &EventDefinition) -> Result<String, EmissionError> {
        Ok(self.messages.comment(&definition.comment_code()).await?)
    }

    fn origin(&self, suffix: Option<&str>) -> Result<String, EmissionError> {
        if self.context.plugin_type.trim().is_empty() {
            return Err(EmissionError::MissingPluginIdentity { field: "type" });
        }
        if self.context.plugin_id.trim().is_empty() {
            return Err(EmissionError::MissingPluginIdentity { field: "id" });
        }
        Ok(build_origin(
            &self.context.plugin_type,
            &self.context.plugin_id,
            suffix,
        ))
    }
}
