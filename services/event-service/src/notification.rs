//! Notification conditions.
//!
//! Each call emits a single observation. Merging repeated observations of the
//! same condition and expiring stale ones is left to the store, keyed by
//! [`NotificationCondition::key`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mws_events::{AssociatedObject, EscalationLevel, NotificationCondition, ValidationError};
use tracing::{debug, warn};

use crate::config::PluginContext;
use crate::error::NotificationError;
use crate::store::EventStore;

/// Factor applied to the polling interval for the default expiration.
const DEFAULT_EXPIRATION_POLLS: u32 = 2;

/// An observed condition, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCondition {
    /// When the condition was observed. Defaults to now.
    pub observed_date: Option<DateTime<Utc>>,
    pub escalation_level: EscalationLevel,
    /// Fully resolved message.
    pub message: String,
    pub associated_object: Option<AssociatedObject>,
    pub details: BTreeMap<String, String>,
    /// Defaults to twice the plugin's polling interval.
    pub expiration_duration: Option<Duration>,
}

impl ObservedCondition {
    pub fn new(escalation_level: EscalationLevel, message: impl Into<String>) -> Self {
        Self {
            observed_date: None,
            escalation_level,
            message: message.into(),
            associated_object: None,
            details: BTreeMap::new(),
            expiration_duration: None,
        }
    }

    pub fn observed_date(mut self, date: DateTime<Utc>) -> Self {
        self.observed_date = Some(date);
        self
    }

    pub fn associated_object(mut self, object: AssociatedObject) -> Self {
        self.associated_object = Some(object);
        self
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn expiration_duration(mut self, duration: Duration) -> Self {
        self.expiration_duration = Some(duration);
        self
    }
}

/// Creates notification conditions for one plugin instance.
#[derive(Clone)]
pub struct NotificationService {
    context: PluginContext,
    store: Arc<dyn EventStore>,
}

impl NotificationService {
    pub fn new(context: PluginContext, store: Arc<dyn EventStore>) -> Self {
        Self { context, store }
    }

    /// Expiration applied when the caller gives none.
    pub fn default_expiration(&self) -> Option<Duration> {
        self.context
            .polling_interval
            .map(|interval| interval.saturating_mul(DEFAULT_EXPIRATION_POLLS))
    }

    /// Validates the observation, applies defaults, and hands it to the store.
    pub async fn create_notification_condition(
        &self,
        observed: ObservedCondition,
    ) -> Result<NotificationCondition, NotificationError> {
        if !observed.escalation_level.allows_notifications() {
            warn!(
                message = %observed.message,
                "Rejected notification condition with INTERNAL escalation"
            );
            return Err(ValidationError::InternalEscalation.into());
        }

        let condition = NotificationCondition {
            observed_date: observed.observed_date.unwrap_or_else(Utc::now),
            escalation_level: observed.escalation_level,
            message: observed.message,
            associated_object: observed.associated_object,
            details: observed.details,
            expiration_duration: observed
                .expiration_duration
                .or_else(|| self.default_expiration()),
        };

        self.store
            .store_notification_condition(condition.clone())
            .await?;

        debug!(
            escalation = %condition.escalation_level,
            expiration_ms = condition.expiration_duration.map(|d| d.as_millis() as u64),
            "Notification condition observed"
        );

        Ok(condition)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mws_events::Event;

    use super::*;
    use crate::store::StoreError;

    #[derive(Default)]
    struct Collect(Mutex<Vec<NotificationCondition>>);

    #[async_trait]
    impl EventStore for Collect {
        async fn store_event(&self, _event: Event) -> Result<(), StoreError> {
            Ok(())
        }

        async fn store_notification_condition(
            &self,
            condition: NotificationCondition,
        ) -> Result<(), StoreError> {
            self.0.lock().unwrap().push(condition);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_explicit_expiration_wins() {
        let store = Arc::new(Collect::default());
        let service = NotificationService::new(
            PluginContext::new("MyPlugin", "inst1").with_polling_interval(Duration::from_secs(30)),
            store.clone(),
        );
        let condition = service
            .create_notification_condition(
                ObservedCondition::new(EscalationLevel::User, "m")
                    .expiration_duration(Duration::from_secs(5)),
            )
            .await
            .unwrap();
        assert_eq!(condition.expiration_duration, Some(Duration::from_secs(5)));
        assert_eq!(store.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_polling_interval_means_no_expiration() {
        let service =
            NotificationService::new(PluginContext::new("MyPlugin", "inst1"), Arc::new(Collect::default()));
        assert_eq!(service.default_expiration(), None);
        let condition = service
            .create_notification_condition(ObservedCondition::new(EscalationLevel::Admin, "m"))
            .await
            .unwrap();
        assert_eq!(condition.expiration_duration, None);
    }

    #[tokio::test]
    async fn test_internal_is_rejected_before_store() {
        let store = Arc::new(Collect::default());
        let service = NotificationService::new(PluginContext::new("MyPlugin", "inst1"), store.clone());
        let err = service
            .create_notification_condition(ObservedCondition::new(EscalationLevel::Internal, "m"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NotificationError::Validation(ValidationError::InternalEscalation)
        ));
        assert!(store.0.lock().unwrap().is_empty());
    }
}
