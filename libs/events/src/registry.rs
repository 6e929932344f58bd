//! Event definition registry.
//!
//! A registry is built once from an ordered list of definition specs and is
//! immutable afterwards. The position of a definition in that list is its
//! event code, so reordering a published catalog changes persisted codes.
//! [`Registry::check_codes`] detects that against a previously published map.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::code::MAX_LOCAL_CODE;
use crate::derive;
use crate::error::ValidationError;
use crate::types::{EscalationLevel, Severity};

// =============================================================================
// Definition Specs
// =============================================================================

/// A static override as declared, before it is resolved at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticOverride {
    /// A plain string.
    Text(String),
    /// Anything else a declarative document may contain.
    Other(serde_json::Value),
}

impl StaticOverride {
    fn resolve(&self, definition: &str, field: &'static str) -> Result<String, ValidationError> {
        match self {
            StaticOverride::Text(text) if !text.trim().is_empty() => Ok(text.clone()),
            StaticOverride::Text(text) => Err(ValidationError::UnresolvableOverride {
                definition: definition.to_string(),
                field,
                found: format!("{:?}", text),
            }),
            StaticOverride::Other(value) => Err(ValidationError::UnresolvableOverride {
                definition: definition.to_string(),
                field,
                found: value.to_string(),
            }),
        }
    }
}

impl From<&str> for StaticOverride {
    fn from(s: &str) -> Self {
        StaticOverride::Text(s.to_string())
    }
}

impl From<String> for StaticOverride {
    fn from(s: String) -> Self {
        StaticOverride::Text(s)
    }
}

/// Declaration of one event kind, as supplied to [`Registry::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinitionSpec {
    pub name: String,
    pub severity: Severity,
    pub escalation_level: EscalationLevel,
    pub type_prefix: Option<StaticOverride>,
    pub origin_suffix: Option<StaticOverride>,
}

impl EventDefinitionSpec {
    pub fn new(name: impl Into<String>, severity: Severity, escalation_level: EscalationLevel) -> Self {
        Self {
            name: name.into(),
            severity,
            escalation_level,
            type_prefix: None,
            origin_suffix: None,
        }
    }

    pub fn with_type_prefix(mut self, prefix: impl Into<StaticOverride>) -> Self {
        self.type_prefix = Some(prefix.into());
        self
    }

    pub fn with_origin_suffix(mut self, suffix: impl Into<StaticOverride>) -> Self {
        self.origin_suffix = Some(suffix.into());
        self
    }
}

// =============================================================================
// Registered Definitions
// =============================================================================

/// A validated, registered event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    catalog: Arc<str>,
    name: String,
    severity: Severity,
    escalation_level: EscalationLevel,
    declaration_index: u32,
    type_prefix: Option<String>,
    origin_suffix: Option<String>,
}

impl EventDefinition {
    /// Name of the catalog this definition belongs to.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn escalation_level(&self) -> EscalationLevel {
        self.escalation_level
    }

    /// Position in the declared order.
    pub fn declaration_index(&self) -> u32 {
        self.declaration_index
    }

    /// The local event code. Equal to the declaration index.
    pub fn code(&self) -> u32 {
        self.declaration_index
    }

    pub fn type_prefix(&self) -> Option<&str> {
        self.type_prefix.as_deref()
    }

    pub fn origin_suffix_override(&self) -> Option<&str> {
        self.origin_suffix.as_deref()
    }

    pub fn message_code(&self) -> String {
        derive::message_code(&self.catalog, self)
    }

    pub fn comment_code(&self) -> String {
        derive::comment_code(&self.catalog, self)
    }

    pub fn event_type(&self) -> String {
        derive::event_type(self)
    }

    pub fn origin_suffix(&self) -> String {
        derive::origin_suffix(&self.catalog, self)
    }
}

/// One row of the event dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub code: u32,
    pub name: String,
    pub severity: String,
    pub escalation_level: String,
    pub event_type: String,
    pub origin_suffix: String,
    pub message_code: String,
    pub comment_code: String,
}

/// A difference between the current catalog and previously published codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodeDrift {
    /// The definition still exists but its code changed.
    Moved { name: String, previous: u32, current: u32 },
    /// The definition no longer exists.
    Removed { name: String, previous: u32 },
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable, ordered catalog of event definitions.
#[derive(Debug, Clone)]
pub struct Registry {
    catalog: Arc<str>,
    definitions: Vec<EventDefinition>,
    by_name: HashMap<String, usize>,
}

fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl Registry {
    /// Validates the specs and builds the registry.
    ///
    /// Codes are assigned by position. Names are compared case-insensitively.
    pub fn build(
        definitions: Vec<EventDefinitionSpec>,
        catalog: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let catalog: String = catalog.into();
        if catalog.trim().is_empty() {
            return Err(ValidationError::EmptyCatalogName);
        }
        if definitions.is_empty() {
            return Err(ValidationError::EmptyCatalog { catalog });
        }
        if definitions.len() > MAX_LOCAL_CODE as usize + 1 {
            return Err(ValidationError::TooManyDefinitions {
                catalog,
                count: definitions.len(),
                max: MAX_LOCAL_CODE as usize + 1,
            });
        }

        let catalog: Arc<str> = Arc::from(catalog);
        let mut by_name = HashMap::with_capacity(definitions.len());
        let mut registered: Vec<EventDefinition> = Vec::with_capacity(definitions.len());

        for (index, spec) in definitions.into_iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(ValidationError::EmptyDefinitionName {
                    catalog: catalog.to_string(),
                    index,
                });
            }
            if let Some(&existing) = by_name.get(&name_key(&spec.name)) {
                let existing: &EventDefinition = &registered[existing];
                return Err(ValidationError::DuplicateName {
                    catalog: catalog.to_string(),
                    name: spec.name,
                    existing: existing.name.clone(),
                });
            }

            let type_prefix = spec
                .type_prefix
                .as_ref()
                .map(|o| o.resolve(&spec.name, "type prefix"))
                .transpose()?;
            let origin_suffix = spec
                .origin_suffix
                .as_ref()
                .map(|o| o.resolve(&spec.name, "origin suffix"))
                .transpose()?;

            by_name.insert(name_key(&spec.name), index);
            registered.push(EventDefinition {
                catalog: Arc::clone(&catalog),
                name: spec.name,
                severity: spec.severity,
                escalation_level: spec.escalation_level,
                declaration_index: index as u32,
                type_prefix,
                origin_suffix,
            });
        }

        info!(
            catalog = %catalog,
            events = registered.len(),
            "Event catalog registered"
        );

        Ok(Self {
            catalog,
            definitions: registered,
            by_name,
        })
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.definitions.iter()
    }

    /// Looks up a definition by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&EventDefinition> {
        self.by_name
            .get(&name_key(name))
            .map(|&index| &self.definitions[index])
    }

    /// Looks up a definition by local code.
    pub fn by_code(&self, code: u32) -> Option<&EventDefinition> {
        self.definitions.get(code as usize)
    }

    /// Name → code map, suitable for publishing and later drift checks.
    pub fn codes(&self) -> BTreeMap<String, u32> {
        self.definitions
            .iter()
            .map(|d| (d.name.clone(), d.code()))
            .collect()
    }

    /// Documentation view of every definition, in code order.
    pub fn dictionary(&self) -> Vec<DictionaryEntry> {
        self.definitions
            .iter()
            .map(|d| DictionaryEntry {
                code: d.code(),
                name: d.name.clone(),
                severity: d.severity.to_string(),
                escalation_level: d.escalation_level.to_string(),
                event_type: d.event_type(),
                origin_suffix: d.origin_suffix(),
                message_code: d.message_code(),
                comment_code: d.comment_code(),
            })
            .collect()
    }

    /// Compares against previously published codes and warns on every drift.
    ///
    /// Definitions added since the previous publication are not drift.
    pub fn check_codes(&self, previous: &BTreeMap<String, u32>) -> Vec<CodeDrift> {
        let mut drift = Vec::new();
        for (name, &previous_code) in previous {
            match self.get(name) {
                Some(def) if def.code() == previous_code => {}
                Some(def) => {
                    warn!(
                        catalog = %self.catalog,
                        event = %def.name,
                        previous = previous_code,
                        current = def.code(),
                        "Event code changed since last publication"
                    );
                    drift.push(CodeDrift::Moved {
                        name: def.name.clone(),
                        previous: previous_code,
                        current: def.code(),
                    });
                }
                None => {
                    warn!(
                        catalog = %self.catalog,
                        event = %name,
                        previous = previous_code,
                        "Event removed since last publication"
                    );
                    drift.push(CodeDrift::Removed {
                        name: name.clone(),
                        previous: previous_code,
                    });
                }
            }
        }
        drift
    }
}

// =============================================================================
// Tests
// =============================================================================
