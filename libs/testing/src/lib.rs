//! Test doubles for the event services.
//!
//! - [`RecordingStore`] keeps every record it receives and can be told to fail
//! - [`StaticMessages`] resolves message codes from an in-memory table

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mws_event_service::{EventStore, MessageCatalog, MessageError, StoreError};
use mws_events::{Event, NotificationCondition};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Store that records everything it is handed.
#[derive(Debug, Default)]
pub struct RecordingStore {
    events: Mutex<Vec<Event>>,
    conditions: Mutex<Vec<NotificationCondition>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every record as unavailable.
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    /// Number of store calls, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<Event> {
        lock(&self.events).clone()
    }

    pub fn conditions(&self) -> Vec<NotificationCondition> {
        lock(&self.conditions).clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("recording store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for RecordingStore {
    async fn store_event(&self, event: Event) -> Result<(), StoreError> {
        self.check()?;
        lock(&self.events).push(event);
        Ok(())
    }

    async fn store_notification_condition(
        &self,
        condition: NotificationCondition,
    ) -> Result<(), StoreError> {
        self.check()?;
        lock(&self.conditions).push(condition);
        Ok(())
    }
}

/// Message catalog backed by a table of templates.
///
/// Templates use positional placeholders: `"Job {0} was cancelled by {1}"`.
#[derive(Debug, Default, Clone)]
pub struct StaticMessages {
    templates: HashMap<String, String>,
}

impl StaticMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(code.into(), template.into());
        self
    }

    fn template(&self, code: &str) -> Result<&str, MessageError> {
        self.templates
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| MessageError::NotFound(code.to_string()))
    }
}

#[async_trait]
impl MessageCatalog for StaticMessages {
    async fn message(&self, code: &str, arguments: &[String]) -> Result<String, MessageError> {
        let mut message = self.template(code)?.to_string();
        for (i, argument) in arguments.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), argument);
        }
        Ok(message)
    }

    async fn comment(&self, code: &str) -> Result<String, MessageError> {
        Ok(self.template(code)?.to_string())
    }
}
