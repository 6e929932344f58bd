//! Event and notification condition records.
//!
//! Records are immutable once built and serialize to the flat wire shapes
//! accepted by event stores.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::EventCode;
use crate::types::{AssociatedObject, EscalationLevel, Severity};

/// A single observed occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub date: DateTime<Utc>,

    #[serde(rename = "severityCode")]
    pub severity: Severity,

    #[serde(rename = "escalationCode")]
    pub escalation_level: EscalationLevel,

    #[serde(rename = "eventCode")]
    pub code: EventCode,

    pub event_type: Option<String>,

    /// Fully qualified origin, e.g. `MWS/plugins/MyPlugin/inst1/Jobs/Submit`.
    pub origin: String,

    /// Fully resolved message.
    pub message: String,

    pub arguments: Vec<String>,

    pub associated_objects: Vec<AssociatedObject>,
}

/// An observed, possibly repeating condition with an expiration window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCondition {
    pub observed_date: DateTime<Utc>,

    #[serde(rename = "escalationCode")]
    pub escalation_level: EscalationLevel,

    pub message: String,

    pub associated_object: Option<AssociatedObject>,

    pub details: BTreeMap<String, String>,

    /// Time before the store marks the condition expired unless re-observed.
    /// Serialized as milliseconds.
    #[serde(with = "duration_millis")]
    pub expiration_duration: Option<Duration>,
}

/// Identity of a notification condition across observations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionKey {
    pub escalation_level: EscalationLevel,
    pub message: String,
    pub associated_object: Option<AssociatedObject>,
}

impl NotificationCondition {
    /// Returns the key a store uses to merge re-observations.
    pub fn key(&self) -> ConditionKey {
        ConditionKey {
            escalation_level: self.escalation_level,
            message: self.message.clone(),
            associated_object: self.associated_object.clone(),
        }
    }

    /// When the condition expires if it is not observed again.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let duration = chrono::Duration::from_std(self.expiration_duration?).ok()?;
        self.observed_date.checked_add_signed(duration)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => {
                let millis = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
                serializer.serialize_some(&millis)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
